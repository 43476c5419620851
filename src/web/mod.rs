//! # Web Envelope
//!
//! JSON response helpers and multipart upload extraction for axum
//! handlers. Routing stays with the caller; nothing here builds a `Router`.

pub mod response;
pub mod upload;

pub use response::{
    json_message, json_not_found, json_ok, json_require_login, json_response, require_id, ApiError,
    MessageResponse,
};
pub use upload::{read_verified_upload, VerifiedUpload};
