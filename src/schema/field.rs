//! Field specifications
//!
//! A field is declared as `(name, expected type, initializer, options)`. The
//! initializer turns the raw JSON value into a [`FieldValue`]; when it is
//! omitted the expected type drives a default coercion.

use std::fmt;

use serde_json::Value;

use super::error::CoercionError;
use super::record::ConstructOptions;
use super::descriptor::Schema;
use super::value::{FieldValue, coerce};
use crate::codec::snake_to_camel;
use crate::enums::EnumDescriptor;

/// Accessor for a nested record's schema, usually `SomeType::schema`
pub type SchemaRef = fn() -> &'static Schema;

/// Custom initializer: raw JSON in, coerced value out
pub type Initializer = fn(Value, &InitContext<'_>) -> Result<FieldValue, CoercionError>;

/// Fixed keyword options handed to an initializer
pub type InitOptions = &'static [(&'static str, &'static str)];

/// Semantic type a field's value must conform to
#[derive(Clone)]
pub enum FieldType {
    Boolean,
    Integer,
    /// Also accepts integers
    Float,
    Text,
    Url,
    Date,
    DateTime,
    Duration,
    Energy,
    Mass,
    Enum(&'static EnumDescriptor),
    Record(SchemaRef),
    List(Box<FieldType>),
    /// Repeated schema.org property
    Property(Box<FieldType>),
    /// Free-form JSON object
    Map,
    /// Any JSON value
    Json,
}

impl FieldType {
    pub fn list_of(element: FieldType) -> Self {
        FieldType::List(Box::new(element))
    }

    pub fn property_of(element: FieldType) -> Self {
        FieldType::Property(Box::new(element))
    }

    /// Human readable name, used in error messages
    pub fn name(&self) -> String {
        match self {
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Text => "text".to_string(),
            FieldType::Url => "URL".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::DateTime => "date-time".to_string(),
            FieldType::Duration => "duration".to_string(),
            FieldType::Energy => "energy".to_string(),
            FieldType::Mass => "mass".to_string(),
            FieldType::Enum(descriptor) => descriptor.name.to_string(),
            FieldType::Record(schema) => schema().name().to_string(),
            FieldType::List(element) => format!("list of {}", element.name()),
            FieldType::Property(element) => format!("property of {}", element.name()),
            FieldType::Map => "mapping".to_string(),
            FieldType::Json => "any".to_string(),
        }
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldType::Enum(a), FieldType::Enum(b)) => a.name == b.name,
            (FieldType::Record(a), FieldType::Record(b)) => std::ptr::eq(a(), b()),
            (FieldType::List(a), FieldType::List(b)) => a == b,
            (FieldType::Property(a), FieldType::Property(b)) => a == b,
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// One declared field
#[derive(Clone)]
pub struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) wire_name: String,
    pub(crate) field_type: FieldType,
    pub(crate) initializer: Option<Initializer>,
    pub(crate) options: InitOptions,
}

impl FieldSpec {
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            wire_name: snake_to_camel(name),
            field_type,
            initializer: None,
            options: &[],
        }
    }

    pub fn with_initializer(mut self, initializer: Initializer, options: InitOptions) -> Self {
        self.initializer = Some(initializer);
        self.options = options;
        self
    }

    /// Internal snake_case name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// camelCase key used on the wire
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn has_initializer(&self) -> bool {
        self.initializer.is_some()
    }

    /// Run the initializer, or the type-directed default
    pub(crate) fn initialize(
        &self,
        raw: Value,
        options: &ConstructOptions,
    ) -> Result<FieldValue, CoercionError> {
        let ctx = InitContext {
            field: self,
            construct: options,
        };
        match self.initializer {
            Some(initializer) => initializer(raw, &ctx),
            None => ctx.coerce(raw),
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("wire_name", &self.wire_name)
            .field("field_type", &self.field_type)
            .field("options", &self.options)
            .finish()
    }
}

/// What an initializer can see while it runs
pub struct InitContext<'a> {
    pub field: &'a FieldSpec,
    pub construct: &'a ConstructOptions,
}

impl InitContext<'_> {
    /// Look up one of the field's fixed initializer options
    pub fn option(&self, key: &str) -> Option<&'static str> {
        self.field
            .options
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    /// Default coercion for the field's declared type
    pub fn coerce(&self, raw: Value) -> Result<FieldValue, CoercionError> {
        coerce(&self.field.field_type, raw, self.construct)
    }

    /// Default coercion for some other type, e.g. a list element
    pub fn coerce_as(&self, field_type: &FieldType, raw: Value) -> Result<FieldValue, CoercionError> {
        coerce(field_type, raw, self.construct)
    }
}
