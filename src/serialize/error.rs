//! Error types for serialization

use thiserror::Error;

/// Errors while turning records into JSON or JSON-LD text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    /// A value with no JSON representation, e.g. a NaN float
    #[error("Object of type {0} is not JSON serializable")]
    NotSerializable(String),

    /// Text handed to the JSON-LD helpers is not a minified JSON object
    #[error("invalid JSON-LD: {0}")]
    InvalidJsonLd(String),

    #[error("JSON-LD already has a @context")]
    ContextAlreadyPresent,

    #[error("JSON encoding error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SerializeError {
    fn from(e: serde_json::Error) -> Self {
        SerializeError::Json(e.to_string())
    }
}

/// Result type for serialization
pub type SerializeResult<T> = Result<T, SerializeError>;
