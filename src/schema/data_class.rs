//! Typed wrappers over records

use serde_json::{Map, Value};

use super::descriptor::Schema;
use super::error::{ConstructionError, ConstructionResult};
use super::record::{ConstructOptions, Record};
use super::value::FieldValue;

/// A record type with its own schema and typed accessors
pub trait DataClass: Sized {
    /// The type's schema, built once on first use
    fn schema() -> &'static Schema;

    /// Wrap a record already built from [`DataClass::schema`]
    fn wrap(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn into_record(self) -> Record;

    /// Build from a raw JSON object keyed by wire names
    fn construct(source: Value, options: &ConstructOptions) -> ConstructionResult<Self> {
        Self::schema().construct(source, options).map(Self::wrap)
    }

    /// Wrap a record, checking it was built from this type's schema
    fn from_record(record: Record) -> ConstructionResult<Self> {
        if std::ptr::eq(record.schema(), Self::schema()) {
            Ok(Self::wrap(record))
        } else {
            Err(ConstructionError::InvariantViolation {
                record: Self::schema().name().to_string(),
                message: format!("record was built as {}", record.type_name()),
            })
        }
    }

    fn to_wire_mapping(&self) -> Map<String, Value> {
        self.record().to_wire_mapping()
    }

    /// Warnings recorded while this value was built
    fn warnings(&self) -> Vec<String> {
        self.record().all_warnings()
    }
}

/// A data class compared by a single identifying field
pub trait Identified: DataClass {
    const IDENTITY_FIELD: &'static str;

    fn identity(&self) -> Option<&FieldValue> {
        self.record().get(Self::IDENTITY_FIELD)
    }
}

/// Typed nested record of a data class, cloned out of its parent
pub fn nested<T: DataClass>(record: &Record, field: &str) -> Option<T> {
    record
        .get_record(field)
        .filter(|nested| std::ptr::eq(nested.schema(), T::schema()))
        .map(|nested| T::wrap(nested.clone()))
}

/// Typed nested records of a list or property field
pub fn nested_all<T: DataClass>(record: &Record, field: &str) -> Vec<T> {
    let values: &[FieldValue] = match record.get(field) {
        Some(FieldValue::List(values)) => values,
        Some(FieldValue::Property(property)) => property.values(),
        _ => &[],
    };
    values
        .iter()
        .filter_map(FieldValue::as_record)
        .filter(|nested| std::ptr::eq(nested.schema(), T::schema()))
        .map(|nested| T::wrap(nested.clone()))
        .collect()
}

/// Declare a [`DataClass`] newtype over [`Record`].
///
/// The schema expression must evaluate to
/// `Result<Schema, SchemaDefinitionError>`; it runs once, on first use, and
/// a definition error panics with its message. With `identity = "field"`
/// equality compares that field only.
#[macro_export]
macro_rules! data_class {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $schema:expr;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::schema::Record);

        $crate::data_class!(@impl $name => $schema);
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $schema:expr, identity = $identity:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name($crate::schema::Record);

        $crate::data_class!(@impl $name => $schema);

        impl $crate::schema::Identified for $name {
            const IDENTITY_FIELD: &'static str = $identity;
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::schema::Identified::identity(self) == $crate::schema::Identified::identity(other)
            }
        }
    };
    (@impl $name:ident => $schema:expr) => {
        impl $crate::schema::DataClass for $name {
            fn schema() -> &'static $crate::schema::Schema {
                static SCHEMA: ::once_cell::sync::Lazy<$crate::schema::Schema> =
                    ::once_cell::sync::Lazy::new(|| match $schema {
                        Ok(schema) => schema,
                        Err(e) => panic!("{}", e),
                    });
                &SCHEMA
            }

            fn wrap(record: $crate::schema::Record) -> Self {
                Self(record)
            }

            fn record(&self) -> &$crate::schema::Record {
                &self.0
            }

            fn into_record(self) -> $crate::schema::Record {
                self.0
            }
        }
    };
}
