//! Typed record schemas
//!
//! A [`Schema`] is an ordered list of field specifications declared once per
//! record type. Construction looks every field up under its camelCase wire
//! name, coerces the raw value, checks it against the declared type and then
//! deals with whatever keys were left over:
//!
//! ```
//! use datatrans::schema::{ConstructOptions, ConstructionError, FieldType, Schema};
//! use once_cell::sync::Lazy;
//! use serde_json::json;
//!
//! static UNIT: Lazy<Schema> = Lazy::new(|| {
//!     Schema::builder("MeasureUnit")
//!         .field("id", FieldType::Integer)
//!         .field("unit_name", FieldType::Text)
//!         .build()
//!         .unwrap()
//! });
//!
//! let schema: &'static Schema = &UNIT;
//! let record = schema
//!     .construct(json!({"id": 1000, "unitName": "cup"}), &ConstructOptions::strict())
//!     .unwrap();
//! assert_eq!(record.get_str("unit_name"), Some("cup"));
//!
//! let extra = json!({"id": 1000, "abbreviation": "c"});
//! assert!(matches!(
//!     schema.construct(extra.clone(), &ConstructOptions::strict()),
//!     Err(ConstructionError::UnconsumedKeys { .. })
//! ));
//! let lenient = schema.construct(extra, &ConstructOptions::lenient()).unwrap();
//! assert_eq!(lenient.warnings().len(), 1);
//! ```

pub mod data_class;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod init;
pub mod record;
pub mod value;

pub use data_class::{DataClass, Identified, nested, nested_all};
pub use descriptor::{Schema, SchemaBuilder, Validator};
pub use error::{CoercionError, ConstructionError, ConstructionResult, SchemaDefinitionError};
pub use field::{FieldSpec, FieldType, InitContext, InitOptions, Initializer, SchemaRef};
pub use record::{ConstructOptions, Record};
pub use value::{FieldValue, Property, coerce};
