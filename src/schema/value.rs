//! Field values and default coercion

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Number, Value};

use super::error::CoercionError;
use super::field::FieldType;
use super::record::{ConstructOptions, Record};
use crate::codec::json_kind;
use crate::enums::{EnumValue, WireEnum};
use crate::structured_data::{
    Duration, Energy, Mass, Url, format_datetime, parse_iso_date, parse_iso_datetime,
};

/// A coerced field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Url(Url),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Duration(Duration),
    Energy(Energy),
    Mass(Mass),
    Enum(EnumValue),
    Record(Box<Record>),
    List(Vec<FieldValue>),
    Property(Property),
    Map(Map<String, Value>),
    Json(Value),
}

impl FieldValue {
    /// Name of the value's kind, used in error messages
    pub fn kind_name(&self) -> String {
        match self {
            FieldValue::Boolean(_) => "boolean".to_string(),
            FieldValue::Integer(_) => "integer".to_string(),
            FieldValue::Float(_) => "float".to_string(),
            FieldValue::Text(_) => "text".to_string(),
            FieldValue::Url(_) => "URL".to_string(),
            FieldValue::Date(_) => "date".to_string(),
            FieldValue::DateTime(_) => "date-time".to_string(),
            FieldValue::Duration(_) => "duration".to_string(),
            FieldValue::Energy(_) => "energy".to_string(),
            FieldValue::Mass(_) => "mass".to_string(),
            FieldValue::Enum(value) => value.enum_name.to_string(),
            FieldValue::Record(record) => record.type_name().to_string(),
            FieldValue::List(_) => "list".to_string(),
            FieldValue::Property(property) => {
                format!("property of {}", property.element_type().name())
            }
            FieldValue::Map(_) => "mapping".to_string(),
            FieldValue::Json(value) => json_kind(value).to_string(),
        }
    }

    /// Whether the value may be stored in a field of `field_type`
    pub fn conforms_to(&self, field_type: &FieldType) -> bool {
        match (field_type, self) {
            (FieldType::Json, _) => true,
            (FieldType::Boolean, FieldValue::Boolean(_))
            | (FieldType::Integer, FieldValue::Integer(_))
            | (FieldType::Float, FieldValue::Float(_) | FieldValue::Integer(_))
            | (FieldType::Text, FieldValue::Text(_))
            | (FieldType::Url, FieldValue::Url(_))
            | (FieldType::Date, FieldValue::Date(_))
            | (FieldType::DateTime, FieldValue::DateTime(_))
            | (FieldType::Duration, FieldValue::Duration(_))
            | (FieldType::Energy, FieldValue::Energy(_))
            | (FieldType::Mass, FieldValue::Mass(_))
            | (FieldType::Map, FieldValue::Map(_)) => true,
            (FieldType::Enum(descriptor), FieldValue::Enum(value)) => {
                value.enum_name == descriptor.name
            }
            (FieldType::Record(schema), FieldValue::Record(record)) => {
                std::ptr::eq(record.schema(), schema())
            }
            (FieldType::List(element), FieldValue::List(values)) => {
                values.iter().all(|value| value.conforms_to(element))
            }
            (FieldType::Property(element), FieldValue::Property(property)) => {
                property.element_type() == element.as_ref()
                    && property.iter().all(|value| value.conforms_to(element))
            }
            _ => false,
        }
    }

    /// Plain JSON form, as it would appear in a raw mapping.
    ///
    /// Properties are always arrays here and non-finite floats become null.
    pub fn to_wire(&self) -> Value {
        match self {
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Url(url) => Value::String(url.to_string()),
            FieldValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Value::String(format_datetime(dt)),
            FieldValue::Duration(duration) => Value::String(duration.iso_format()),
            FieldValue::Energy(energy) => Value::String(energy.to_string()),
            FieldValue::Mass(mass) => Value::String(mass.to_string()),
            FieldValue::Enum(value) => Value::String(value.wire.to_string()),
            FieldValue::Record(record) => Value::Object(record.to_wire_mapping()),
            FieldValue::List(values) => Value::Array(values.iter().map(FieldValue::to_wire).collect()),
            FieldValue::Property(property) => {
                Value::Array(property.iter().map(FieldValue::to_wire).collect())
            }
            FieldValue::Map(map) => Value::Object(map.clone()),
            FieldValue::Json(value) => value.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Url(url) => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_enum<E: WireEnum>(&self) -> Option<E> {
        match self {
            FieldValue::Enum(value) => value.to_enum(),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Url> for FieldValue {
    fn from(value: Url) -> Self {
        FieldValue::Url(value)
    }
}

impl From<Record> for FieldValue {
    fn from(value: Record) -> Self {
        FieldValue::Record(Box::new(value))
    }
}

/// Ordered values of a single element type.
///
/// Serialized as the bare element when it holds exactly one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    element: FieldType,
    values: Vec<FieldValue>,
}

impl Property {
    pub fn new(element: FieldType) -> Self {
        Self {
            element,
            values: Vec::new(),
        }
    }

    /// Build a property, checking every value against `element`
    pub fn with_values(
        element: FieldType,
        values: impl IntoIterator<Item = FieldValue>,
    ) -> Result<Self, CoercionError> {
        let mut property = Self::new(element);
        for value in values {
            property.push(value)?;
        }
        Ok(property)
    }

    /// Append a value of the declared element type
    pub fn push(&mut self, value: FieldValue) -> Result<(), CoercionError> {
        if !value.conforms_to(&self.element) {
            return Err(CoercionError::mismatch(self.element.name(), value.kind_name()));
        }
        self.values.push(value);
        Ok(())
    }

    pub fn element_type(&self) -> &FieldType {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldValue> {
        self.values.iter()
    }

    pub fn first(&self) -> Option<&FieldValue> {
        self.values.first()
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Stable reorder by a caller-provided key
    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&FieldValue) -> K) {
        self.values.sort_by_key(key);
    }

    pub fn reverse(&mut self) {
        self.values.reverse();
    }
}

impl<'a> IntoIterator for &'a Property {
    type Item = &'a FieldValue;
    type IntoIter = std::slice::Iter<'a, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn mismatch(field_type: &FieldType, raw: &Value) -> CoercionError {
    CoercionError::mismatch(field_type.name(), json_kind(raw))
}

fn integer_from_f64(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_text<T, E: std::fmt::Display>(
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
    expected: &str,
) -> Result<T, CoercionError> {
    parse(text.trim()).map_err(|e| {
        CoercionError::Invalid(format!("cannot read '{}' as {}: {}", text, expected, e))
    })
}

/// Type-directed default coercion of a raw JSON value.
///
/// Strings are parsed into the richer types, integers widen to floats and
/// numbers may stand in for text. A JSON kind with no sensible conversion is
/// a [`CoercionError::Mismatch`].
pub fn coerce(
    field_type: &FieldType,
    raw: Value,
    options: &ConstructOptions,
) -> Result<FieldValue, CoercionError> {
    match field_type {
        FieldType::Json => Ok(FieldValue::Json(raw)),
        FieldType::Boolean => match raw {
            Value::Bool(b) => Ok(FieldValue::Boolean(b)),
            other => Err(mismatch(field_type, &other)),
        },
        FieldType::Integer => match &raw {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(integer_from_f64))
                .map(FieldValue::Integer)
                .ok_or_else(|| CoercionError::Invalid(format!("{} is not an integer", n))),
            Value::String(s) => parse_text(s, str::parse::<i64>, "an integer").map(FieldValue::Integer),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Float => match &raw {
            Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Float)
                .ok_or_else(|| CoercionError::Invalid(format!("{} is not a float", n))),
            Value::String(s) => parse_text(s, str::parse::<f64>, "a float").map(FieldValue::Float),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Text => match raw {
            Value::String(s) => Ok(FieldValue::Text(s)),
            Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
            other => Err(mismatch(field_type, &other)),
        },
        FieldType::Url => match &raw {
            Value::String(s) => Ok(FieldValue::Url(Url::parse(s)?)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Date => match &raw {
            Value::String(s) => Ok(FieldValue::Date(parse_iso_date(s)?)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::DateTime => match &raw {
            Value::String(s) => Ok(FieldValue::DateTime(parse_iso_datetime(s)?)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Duration => match &raw {
            Value::String(s) => Ok(FieldValue::Duration(Duration::parse_iso(s)?)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Energy => match &raw {
            Value::String(s) => Ok(FieldValue::Energy(Energy::parse(s)?)),
            Value::Number(n) => n
                .as_f64()
                .map(|calories| FieldValue::Energy(Energy::calories(calories)))
                .ok_or_else(|| mismatch(field_type, &raw)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Mass => match &raw {
            Value::String(s) => Ok(FieldValue::Mass(Mass::parse(s)?)),
            Value::Number(n) => n
                .as_f64()
                .map(|grams| FieldValue::Mass(Mass::grams(grams)))
                .ok_or_else(|| mismatch(field_type, &raw)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Enum(descriptor) => match &raw {
            Value::String(s) => Ok(FieldValue::Enum(descriptor.parse(s)?)),
            other => Err(mismatch(field_type, other)),
        },
        FieldType::Record(schema) => match raw {
            Value::Object(map) => {
                let record = schema().construct_map(map, options)?;
                Ok(FieldValue::Record(Box::new(record)))
            }
            other => Err(mismatch(field_type, &other)),
        },
        FieldType::List(element) => match raw {
            Value::Array(items) => items
                .into_iter()
                .map(|item| coerce(element, item, options))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List),
            other => Err(mismatch(field_type, &other)),
        },
        FieldType::Property(element) => {
            let items = match raw {
                Value::Array(items) => items,
                single => vec![single],
            };
            let values = items
                .into_iter()
                .map(|item| coerce(element, item, options))
                .collect::<Result<Vec<_>, _>>()?;
            Property::with_values(element.as_ref().clone(), values).map(FieldValue::Property)
        }
        FieldType::Map => match raw {
            Value::Object(map) => Ok(FieldValue::Map(map)),
            other => Err(mismatch(field_type, &other)),
        },
    }
}
