//! Schema descriptors and generic construction

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

use super::error::{CoercionError, ConstructionError, ConstructionResult, SchemaDefinitionError};
use super::field::{FieldSpec, FieldType, InitOptions, Initializer};
use super::record::{ConstructOptions, Record};
use crate::codec::json_kind;

// snake_case identifier, leading underscores allowed
static FIELD_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_*[a-z][a-z0-9_]*$").unwrap());

/// Post-construction check, returning a message on violation
pub type Validator = fn(&Record) -> Result<(), String>;

/// Immutable description of one record type
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSpec>,
    by_name: HashMap<&'static str, usize>,
    by_wire: HashMap<String, usize>,
    properties: Option<Vec<&'static str>>,
    validators: Vec<Validator>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("properties", &self.properties)
            .finish()
    }
}

impl Schema {
    /// Start declaring a record type
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
            thing: None,
            validators: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index_of(name).map(|index| &self.fields[index])
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Field consuming the given wire key
    pub fn field_by_wire_name(&self, wire: &str) -> Option<&FieldSpec> {
        self.by_wire.get(wire).map(|&index| &self.fields[index])
    }

    /// Whether records of this type are schema.org Things
    pub fn is_thing(&self) -> bool {
        self.properties.is_some()
    }

    /// Ordered serialization whitelist of a Thing, by wire name
    pub fn properties(&self) -> Option<&[&'static str]> {
        self.properties.as_deref()
    }

    /// Build a record from a JSON value, which must be an object
    pub fn construct(
        &'static self,
        source: Value,
        options: &ConstructOptions,
    ) -> ConstructionResult<Record> {
        match source {
            Value::Object(map) => self.construct_map(map, options),
            other => Err(ConstructionError::NotAMapping {
                record: self.name.to_string(),
                actual: json_kind(&other).to_string(),
            }),
        }
    }

    /// Build a record from a mapping keyed by wire name.
    ///
    /// Fields are filled in declaration order and each consumed key is
    /// removed; an absent or null key leaves the field unset.
    pub fn construct_map(
        &'static self,
        mut source: Map<String, Value>,
        options: &ConstructOptions,
    ) -> ConstructionResult<Record> {
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let raw = match take(&mut source, field.wire_name()) {
                Lookup::Absent | Lookup::Null => {
                    values.push(None);
                    continue;
                }
                Lookup::Present(raw) => raw,
            };

            let value = field
                .initialize(raw, options)
                .map_err(|cause| self.coercion_error(field, cause))?;

            if !value.conforms_to(field.field_type()) {
                return Err(ConstructionError::TypeMismatch {
                    record: self.name.to_string(),
                    field: field.name().to_string(),
                    expected: field.field_type().name(),
                    actual: value.kind_name(),
                });
            }
            values.push(Some(value));
        }

        let mut record = Record::from_parts(self, values);

        if !source.is_empty() {
            let keys: Vec<String> = source.keys().cloned().collect();
            if options.strict {
                return Err(ConstructionError::UnconsumedKeys {
                    record: self.name.to_string(),
                    keys,
                });
            }
            warn!(record = self.name, keys = ?keys, "Ignoring unconsumed keys");
            record.push_warning(format!("{}: unconsumed keys {}", self.name, keys.join(", ")));
        }

        for validator in &self.validators {
            validator(&record).map_err(|message| ConstructionError::InvariantViolation {
                record: self.name.to_string(),
                message,
            })?;
        }

        Ok(record)
    }

    fn coercion_error(&self, field: &FieldSpec, cause: CoercionError) -> ConstructionError {
        match cause {
            CoercionError::Mismatch { expected, actual } => ConstructionError::TypeMismatch {
                record: self.name.to_string(),
                field: field.name().to_string(),
                expected,
                actual,
            },
            source => ConstructionError::CoercionFailure {
                record: self.name.to_string(),
                field: field.name().to_string(),
                source,
            },
        }
    }
}

/// Presence of a wire key in the source mapping
enum Lookup {
    Absent,
    Null,
    Present(Value),
}

fn take(source: &mut Map<String, Value>, key: &str) -> Lookup {
    match source.remove(key) {
        None => Lookup::Absent,
        Some(Value::Null) => Lookup::Null,
        Some(value) => Lookup::Present(value),
    }
}

/// Declares a [`Schema`] field by field
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<FieldSpec>,
    thing: Option<&'static [&'static str]>,
    validators: Vec<Validator>,
}

impl SchemaBuilder {
    /// Field coerced by its type
    pub fn field(mut self, name: &'static str, field_type: FieldType) -> Self {
        self.fields.push(FieldSpec::new(name, field_type));
        self
    }

    /// Field coerced by a custom initializer with fixed options
    pub fn field_with(
        mut self,
        name: &'static str,
        field_type: FieldType,
        initializer: Initializer,
        options: InitOptions,
    ) -> Self {
        self.fields
            .push(FieldSpec::new(name, field_type).with_initializer(initializer, options));
        self
    }

    /// Mark the type as a schema.org Thing with an ordered whitelist
    pub fn thing(mut self, properties: &'static [&'static str]) -> Self {
        self.thing = Some(properties);
        self
    }

    /// Add a post-construction invariant
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Check the declaration and build the lookup tables
    pub fn build(self) -> Result<Schema, SchemaDefinitionError> {
        let record = self.name.to_string();
        if self.fields.is_empty() {
            return Err(SchemaDefinitionError::NoFields(record));
        }

        let mut by_name = HashMap::with_capacity(self.fields.len());
        let mut by_wire: HashMap<String, usize> = HashMap::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if !FIELD_NAME_REGEX.is_match(field.name()) {
                return Err(SchemaDefinitionError::MalformedName {
                    record,
                    name: field.name().to_string(),
                });
            }
            if by_name.insert(field.name(), index).is_some() {
                return Err(SchemaDefinitionError::DuplicateName {
                    record,
                    name: field.name().to_string(),
                });
            }
            if let Some(&first) = by_wire.get(field.wire_name()) {
                return Err(SchemaDefinitionError::DuplicateWireName {
                    record,
                    first: self.fields[first].name().to_string(),
                    second: field.name().to_string(),
                    wire: field.wire_name().to_string(),
                });
            }
            by_wire.insert(field.wire_name().to_string(), index);
        }

        let properties = match self.thing {
            None => None,
            Some([]) => return Err(SchemaDefinitionError::MissingWhitelist(record)),
            Some(whitelist) => {
                let mut seen = Vec::with_capacity(whitelist.len());
                for &wire in whitelist {
                    if !by_wire.contains_key(wire) {
                        return Err(SchemaDefinitionError::UnknownWhitelistEntry {
                            record,
                            wire: wire.to_string(),
                        });
                    }
                    if seen.contains(&wire) {
                        return Err(SchemaDefinitionError::DuplicateWhitelistEntry {
                            record,
                            wire: wire.to_string(),
                        });
                    }
                    seen.push(wire);
                }
                Some(seen)
            }
        };

        Ok(Schema {
            name: self.name,
            fields: self.fields,
            by_name,
            by_wire,
            properties,
            validators: self.validators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static INGREDIENT_SCHEMA: Lazy<Schema> = Lazy::new(|| {
        Schema::builder("Ingredient")
            .field("fdc_id", FieldType::Integer)
            .field("description", FieldType::Text)
            .field("common_names", FieldType::list_of(FieldType::Text))
            .build()
            .unwrap()
    });

    fn ingredient() -> &'static Schema {
        &INGREDIENT_SCHEMA
    }

    #[test]
    fn test_builder_rejects_empty_schema() {
        let err = Schema::builder("Empty").build().unwrap_err();
        assert_eq!(err, SchemaDefinitionError::NoFields("Empty".to_string()));
    }

    #[test]
    fn test_builder_rejects_bad_names() {
        assert!(matches!(
            Schema::builder("Bad").field("", FieldType::Text).build(),
            Err(SchemaDefinitionError::MalformedName { .. })
        ));
        assert!(matches!(
            Schema::builder("Bad").field("fdcId", FieldType::Text).build(),
            Err(SchemaDefinitionError::MalformedName { .. })
        ));
        assert!(matches!(
            Schema::builder("Bad")
                .field("name", FieldType::Text)
                .field("name", FieldType::Integer)
                .build(),
            Err(SchemaDefinitionError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_shared_wire_names() {
        let err = Schema::builder("Bad")
            .field("gtin_upc", FieldType::Text)
            .field("gtin__upc", FieldType::Text)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaDefinitionError::DuplicateWireName { ref wire, .. } if wire == "gtinUpc"));
    }

    #[test]
    fn test_builder_checks_thing_whitelist() {
        assert!(matches!(
            Schema::builder("Thingy").field("name", FieldType::Text).thing(&[]).build(),
            Err(SchemaDefinitionError::MissingWhitelist(_))
        ));
        assert!(matches!(
            Schema::builder("Thingy")
                .field("date_published", FieldType::Date)
                .thing(&["date_published"])
                .build(),
            Err(SchemaDefinitionError::UnknownWhitelistEntry { .. })
        ));
        let schema = Schema::builder("Thingy")
            .field("date_published", FieldType::Date)
            .thing(&["datePublished"])
            .build()
            .unwrap();
        assert!(schema.is_thing());
        assert_eq!(schema.properties(), Some(&["datePublished"][..]));
    }

    #[test]
    fn test_construct_consumes_wire_keys() {
        let record = ingredient()
            .construct(
                json!({"fdcId": 168_191, "description": "Cheese, cheddar", "commonNames": ["cheddar"]}),
                &ConstructOptions::strict(),
            )
            .unwrap();
        assert_eq!(record.get_i64("fdc_id"), Some(168_191));
        assert_eq!(record.get_str("description"), Some("Cheese, cheddar"));
        assert_eq!(record.get_list("common_names").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_absent_and_null_are_unset() {
        let record = ingredient()
            .construct(json!({"fdcId": 1, "description": null}), &ConstructOptions::strict())
            .unwrap();
        assert!(!record.is_set("description"));
        assert!(!record.is_set("common_names"));
        assert_eq!(record.to_wire_mapping().len(), 1);
    }

    #[test]
    fn test_first_offending_field_wins() {
        let err = ingredient()
            .construct(json!({"fdcId": "x", "description": []}), &ConstructOptions::strict())
            .unwrap_err();
        assert_eq!(err.field(), Some("fdc_id"));
    }

    #[test]
    fn test_not_a_mapping() {
        assert!(matches!(
            ingredient().construct(json!([1, 2]), &ConstructOptions::strict()),
            Err(ConstructionError::NotAMapping { .. })
        ));
    }

    #[test]
    fn test_validators_run_after_construction() {
        static POSITIVE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
            Schema::builder("Positive")
                .field("id", FieldType::Integer)
                .validate(|record| match record.get_i64("id") {
                    Some(id) if id <= 0 => Err(format!("id {} is not positive", id)),
                    _ => Ok(()),
                })
                .build()
                .unwrap()
        });
        let schema: &'static Schema = &POSITIVE_SCHEMA;
        assert!(schema.construct(json!({"id": 3}), &ConstructOptions::strict()).is_ok());
        assert!(matches!(
            schema.construct(json!({"id": -3}), &ConstructOptions::strict()),
            Err(ConstructionError::InvariantViolation { .. })
        ));
    }
}
