//! # Identifier Errors

use thiserror::Error;

/// Result type for identifier operations
pub type IdResult<T> = Result<T, IdError>;

/// Identifier generation and parsing errors
#[derive(Debug, Error)]
pub enum IdError {
    /// The OS random source could not be read
    #[error("Entropy source unavailable: {0}")]
    Entropy(#[from] rand::Error),

    /// Clock is before the Unix epoch or too far in the future to encode
    #[error("Clock out of range: {0}")]
    Clock(String),

    /// Every random component for this second was already issued
    #[error("Identifier space exhausted for second {0}")]
    Exhausted(u64),

    /// Text is not a valid base-36 identifier
    #[error("Invalid identifier: {0}")]
    Invalid(String),
}
