//! Record instances built from a schema

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::descriptor::Schema;
use super::value::{FieldValue, Property};
use crate::enums::WireEnum;
use crate::structured_data::{Duration, Url};

/// Options for record construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructOptions {
    /// Fail on input keys no field consumed; otherwise record a warning
    pub strict: bool,
}

impl Default for ConstructOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ConstructOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// A constructed record: one optional value per schema field
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static Schema,
    values: Vec<Option<FieldValue>>,
    context: Option<String>,
    warnings: Vec<String>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.values == other.values
            && self.context == other.context
    }
}

impl Record {
    pub(crate) fn from_parts(schema: &'static Schema, values: Vec<Option<FieldValue>>) -> Self {
        Self {
            schema,
            values,
            context: None,
            warnings: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Concrete type name, the `@type` of Thing records
    pub fn type_name(&self) -> &'static str {
        self.schema.name()
    }

    /// Value of a field, `None` when unset or unknown
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .index_of(name)
            .and_then(|index| self.values[index].as_ref())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    pub fn get_url(&self, name: &str) -> Option<&Url> {
        match self.get(name) {
            Some(FieldValue::Url(url)) => Some(url),
            _ => None,
        }
    }

    pub fn get_date(&self, name: &str) -> Option<NaiveDate> {
        match self.get(name) {
            Some(FieldValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    pub fn get_datetime(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        match self.get(name) {
            Some(FieldValue::DateTime(dt)) => Some(*dt),
            _ => None,
        }
    }

    pub fn get_duration(&self, name: &str) -> Option<Duration> {
        match self.get(name) {
            Some(FieldValue::Duration(duration)) => Some(*duration),
            _ => None,
        }
    }

    pub fn get_enum<E: WireEnum>(&self, name: &str) -> Option<E> {
        self.get(name).and_then(FieldValue::as_enum::<E>)
    }

    pub fn get_record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(FieldValue::as_record)
    }

    pub fn get_list(&self, name: &str) -> Option<&[FieldValue]> {
        match self.get(name) {
            Some(FieldValue::List(values)) => Some(values),
            _ => None,
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        match self.get(name) {
            Some(FieldValue::Property(property)) => Some(property),
            _ => None,
        }
    }

    pub fn get_map(&self, name: &str) -> Option<&Map<String, Value>> {
        match self.get(name) {
            Some(FieldValue::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Set fields in declaration order, with their names
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .filter_map(|(spec, value)| value.as_ref().map(|value| (spec.name(), value)))
    }

    /// Set fields keyed by wire name, the inverse of construction
    pub fn to_wire_mapping(&self) -> Map<String, Value> {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .filter_map(|(spec, value)| {
                value
                    .as_ref()
                    .map(|value| (spec.wire_name().to_string(), value.to_wire()))
            })
            .collect()
    }

    /// The same record with one field unset
    pub(crate) fn without(mut self, name: &str) -> Self {
        if let Some(index) = self.schema.index_of(name) {
            self.values[index] = None;
        }
        self
    }

    /// Attach a JSON-LD `@context`
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Warnings recorded on this record itself
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Warnings from this record and every nested record
    pub fn all_warnings(&self) -> Vec<String> {
        let mut collected = self.warnings.clone();
        for value in self.values.iter().flatten() {
            collect_nested_warnings(value, &mut collected);
        }
        collected
    }
}

fn collect_nested_warnings(value: &FieldValue, collected: &mut Vec<String>) {
    match value {
        FieldValue::Record(record) => collected.extend(record.all_warnings()),
        FieldValue::List(values) => {
            for value in values {
                collect_nested_warnings(value, collected);
            }
        }
        FieldValue::Property(property) => {
            for value in property {
                collect_nested_warnings(value, collected);
            }
        }
        _ => {}
    }
}
