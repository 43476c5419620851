//! Base64 helpers over the standard padded alphabet

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine};

pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn base64_decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(s)
}
