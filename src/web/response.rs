//! JSON response envelope
//!
//! Every body is JSON with `Content-Type: application/json; charset=utf-8`
//! and `X-Content-Type-Options: nosniff`. Errors are rendered as
//! `{"message": "..."}` and never carry paths or OS error text.

use std::collections::HashMap;
use std::fmt;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::file_storage::{DeleteErrors, StorageError};
use crate::id::IdError;
use crate::ingest::IngestError;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body of every message response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Serialize `body` as JSON with the envelope headers
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => with_json_headers(status, bytes),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            with_json_headers(
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"message":"Internal Server Error"}"#.to_vec(),
            )
        }
    }
}

fn with_json_headers(status: StatusCode, bytes: Vec<u8>) -> Response {
    let mut response = (status, bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}

/// `{"message": message}` with the given status
pub fn json_message(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(
        status,
        &MessageResponse {
            message: message.into(),
        },
    )
}

pub fn json_ok() -> Response {
    json_message(StatusCode::OK, "OK")
}

pub fn json_not_found() -> Response {
    json_message(StatusCode::NOT_FOUND, "Not Found")
}

pub fn json_require_login() -> Response {
    json_message(StatusCode::UNAUTHORIZED, "Require Login")
}

/// Handler error rendered as a JSON message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_message(self.status, self.message)
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::warn!(error = %e, status = status.as_u16(), "upload rejected");
        Self::new(status, e.public_message())
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        tracing::error!(error = %e, "storage operation failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage error")
    }
}

impl From<DeleteErrors> for ApiError {
    fn from(e: DeleteErrors) -> Self {
        tracing::error!(failures = e.len(), error = %e, "batch delete failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to delete {} file(s)", e.len()),
        )
    }
}

impl From<IdError> for ApiError {
    fn from(e: IdError) -> Self {
        tracing::error!(error = %e, "identifier generation failed");
        Self::internal()
    }
}

/// The non-empty `id` form value, or a 400 `"id is empty"`
pub fn require_id(form: &HashMap<String, String>) -> Result<String, ApiError> {
    match form.get("id") {
        Some(id) if !id.is_empty() => Ok(id.clone()),
        _ => Err(ApiError::bad_request("id is empty")),
    }
}
