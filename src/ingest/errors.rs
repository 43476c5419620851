//! # Ingestion Errors

use std::io;

use thiserror::Error;

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

/// Upload ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input stream failed before it was fully read
    #[error("Transport error: {0}")]
    Transport(#[source] io::Error),

    /// The bytes do not hash to the claimed checksum
    #[error("Checksums do not match (expected: {expected}, actual: {actual})")]
    Integrity { expected: String, actual: String },

    #[error("Upload too large (max: {limit} bytes)")]
    TooLarge { limit: u64 },

    /// A required multipart field was absent
    #[error("Missing form field: {0}")]
    MissingField(String),
}

impl IngestError {
    /// Whether resending the same upload could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, IngestError::Transport(_))
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            IngestError::Transport(_) => 400,
            IngestError::Integrity { .. } => 422,
            IngestError::TooLarge { .. } => 413,
            IngestError::MissingField(_) => 400,
        }
    }

    /// Message safe to show an end user
    pub fn public_message(&self) -> String {
        match self {
            IngestError::Transport(_) => "upload interrupted, please retry".to_string(),
            IngestError::Integrity { .. } => "checksums do not match".to_string(),
            IngestError::TooLarge { limit } => format!("file too large (max: {} bytes)", limit),
            IngestError::MissingField(field) => format!("{} is empty", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        let transport = IngestError::Transport(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        let integrity = IngestError::Integrity {
            expected: "a".into(),
            actual: "b".into(),
        };
        assert!(transport.is_retryable());
        assert!(!integrity.is_retryable());
        assert!(!IngestError::TooLarge { limit: 1 }.is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(IngestError::TooLarge { limit: 1 }.status_code(), 413);
        assert_eq!(IngestError::MissingField("file".into()).status_code(), 400);
        assert_eq!(
            IngestError::Integrity {
                expected: String::new(),
                actual: String::new()
            }
            .status_code(),
            422
        );
    }

    #[test]
    fn test_public_message_hides_transport_detail() {
        let err = IngestError::Transport(io::Error::new(io::ErrorKind::Other, "/srv/private/socket"));
        assert!(!err.public_message().contains("/srv"));
    }
}
