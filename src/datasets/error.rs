//! Error types for dataset conversion

use thiserror::Error;

use crate::schema::ConstructionError;
use crate::serialize::SerializeError;

/// Errors that abort a conversion run, or describe one skipped line
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid JSON: {message}")]
    Json { line: usize, message: String },

    #[error("line {line}: expected a JSON object")]
    NotAnObject { line: usize },

    #[error("line {line}: {source}")]
    Construction {
        line: usize,
        #[source]
        source: ConstructionError,
    },

    #[error("line {line}: {source}")]
    Serialize {
        line: usize,
        #[source]
        source: SerializeError,
    },
}

/// Result type for dataset conversion
pub type DatasetResult<T> = Result<T, DatasetError>;
