//! Error types for record schemas

use thiserror::Error;

use crate::codec::CodecError;
use crate::enums::UnknownEnumValue;

/// A malformed schema declaration.
///
/// Schemas are declared once, as statics, so these surface on first use and
/// are never recovered from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefinitionError {
    #[error("{0} declares no fields")]
    NoFields(String),

    #[error("{record} has a malformed field name '{name}'")]
    MalformedName { record: String, name: String },

    #[error("{record} declares field '{name}' twice")]
    DuplicateName { record: String, name: String },

    #[error("{record} fields '{first}' and '{second}' share the wire name '{wire}'")]
    DuplicateWireName {
        record: String,
        first: String,
        second: String,
        wire: String,
    },

    #[error("{0} is a Thing but has no PROPERTIES whitelist")]
    MissingWhitelist(String),

    #[error("{record} whitelists '{wire}', which is not a field wire name")]
    UnknownWhitelistEntry { record: String, wire: String },

    #[error("{record} whitelists '{wire}' twice")]
    DuplicateWhitelistEntry { record: String, wire: String },
}

/// Why a single raw value could not be turned into a field value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The JSON kind cannot become the expected type at all
    #[error("expected {expected}, found {actual}")]
    Mismatch { expected: String, actual: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Enum(#[from] UnknownEnumValue),

    #[error("nested record: {0}")]
    Nested(#[source] Box<ConstructionError>),

    #[error("{0}")]
    Invalid(String),
}

impl CoercionError {
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CoercionError::Mismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl From<ConstructionError> for CoercionError {
    fn from(e: ConstructionError) -> Self {
        CoercionError::Nested(Box::new(e))
    }
}

/// Failures while building a record from a raw mapping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("{record} must be built from a JSON object, found {actual}")]
    NotAMapping { record: String, actual: String },

    #[error("{record}.{field}: expected {expected}, found {actual}")]
    TypeMismatch {
        record: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("{record}.{field}: {source}")]
    CoercionFailure {
        record: String,
        field: String,
        #[source]
        source: CoercionError,
    },

    #[error("{record}: unconsumed keys {}", keys.join(", "))]
    UnconsumedKeys { record: String, keys: Vec<String> },

    #[error("{record}: required property '{field}' unfilled")]
    MissingRequiredField { record: String, field: String },

    #[error("{record}: {message}")]
    InvariantViolation { record: String, message: String },
}

impl ConstructionError {
    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            ConstructionError::TypeMismatch { field, .. }
            | ConstructionError::CoercionFailure { field, .. }
            | ConstructionError::MissingRequiredField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type for record construction
pub type ConstructionResult<T> = Result<T, ConstructionError>;
