//! Error types for scalar parsing

use thiserror::Error;

/// Errors raised by the scalar parsers in [`crate::codec`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Input was a string but could not be parsed
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Input was not of a kind the parser accepts at all
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
