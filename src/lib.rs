//! datatrans - recipe datasets to schema.org JSON-LD
//!
//! Provides:
//! - A declarative typed-record layer (schemas, coercion, validation)
//! - schema.org structured data types (Recipe, Person, ItemList, ...)
//! - USDA FoodData Central models and a blocking client
//! - JSON / JSON-LD serialization
//! - Dataset adapters that batch-convert scraped recipes

pub mod codec;
pub mod config;
pub mod datasets;
pub mod enums;
pub mod fooddata;
pub mod schema;
pub mod serialize;
pub mod structured_data;

// Re-export commonly used types
pub use config::{ConfigError, DatatransConfig};
pub use enums::{UnknownEnumValue, WireEnum};
pub use schema::{
    ConstructOptions, ConstructionError, DataClass, FieldType, Record, Schema,
    SchemaDefinitionError,
};
pub use serialize::{JsonSerial, SerializeError, to_json_ld};

pub use datasets::{ConversionReport, DataSet, DatasetError};
#[cfg(feature = "api-backend")]
pub use fooddata::FoodDataClient;
pub use fooddata::{FoodDataError, FoodDetail, FoodSearchCriteria};
pub use structured_data::{ItemList, Person, Recipe, RecipeOptions};
