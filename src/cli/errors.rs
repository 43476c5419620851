//! CLI-specific error types

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::file_storage::{DeleteErrors, StorageError};
use crate::id::IdError;
use crate::ingest::IngestError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (input files, stdout)
    IoError,
    /// Input could not be read completely
    TransportError,
    /// Checksum did not match
    IntegrityError,
    /// Input exceeded max_upload_bytes
    TooLarge,
    /// A required upload field was absent
    MissingField,
    /// Writing or inspecting storage failed
    StorageError,
    /// One or more paths could not be removed
    DeleteFailed,
    /// Identifier generation failed
    IdError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SVC_CLI_CONFIG_ERROR",
            Self::IoError => "SVC_CLI_IO_ERROR",
            Self::TransportError => "SVC_TRANSPORT_ERROR",
            Self::IntegrityError => "SVC_INTEGRITY_ERROR",
            Self::TooLarge => "SVC_TOO_LARGE",
            Self::MissingField => "SVC_MISSING_FIELD",
            Self::StorageError => "SVC_STORAGE_ERROR",
            Self::DeleteFailed => "SVC_DELETE_FAILED",
            Self::IdError => "SVC_ID_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<IngestError> for CliError {
    fn from(e: IngestError) -> Self {
        let code = match e {
            IngestError::Transport(_) => CliErrorCode::TransportError,
            IngestError::Integrity { .. } => CliErrorCode::IntegrityError,
            IngestError::TooLarge { .. } => CliErrorCode::TooLarge,
            IngestError::MissingField(_) => CliErrorCode::MissingField,
        };
        Self::new(code, e.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::new(CliErrorCode::StorageError, e.to_string())
    }
}

impl From<DeleteErrors> for CliError {
    fn from(e: DeleteErrors) -> Self {
        Self::new(CliErrorCode::DeleteFailed, e.to_string())
    }
}

impl From<IdError> for CliError {
    fn from(e: IdError) -> Self {
        Self::new(CliErrorCode::IdError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_errors_keep_their_kind() {
        let cases = [
            (IngestError::Transport(io::Error::new(io::ErrorKind::Other, "reset")), "SVC_TRANSPORT_ERROR"),
            (
                IngestError::Integrity {
                    expected: "a".into(),
                    actual: "b".into(),
                },
                "SVC_INTEGRITY_ERROR",
            ),
            (IngestError::TooLarge { limit: 4 }, "SVC_TOO_LARGE"),
            (IngestError::MissingField("checksum".into()), "SVC_MISSING_FIELD"),
        ];

        for (err, code) in cases {
            assert_eq!(CliError::from(err).code_str(), code);
        }
    }
}
