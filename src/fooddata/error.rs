//! Error types for FoodData Central models and requests

use thiserror::Error;

use crate::schema::ConstructionError;

/// Errors from FoodData Central models and the HTTP client
#[derive(Error, Debug)]
pub enum FoodDataError {
    /// A detail response whose `foodClass` names no known food variant
    #[error("'foodClass' is not recognized: {0}")]
    UnrecognizedVariant(String),

    #[error("No criteria to search")]
    EmptyCriteria,

    /// Missing key, or the `.env` placeholder left in place
    #[error("Invalid API key, configure DATA_GOV_API_KEY first")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("FoodData Central returned HTTP {status}: {url}")]
    Status { status: u16, url: String },

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Result type for FoodData Central operations
pub type FoodDataResult<T> = Result<T, FoodDataError>;
