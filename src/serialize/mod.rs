//! Record graph → JSON / JSON-LD
//!
//! Everything that can appear in a record graph implements [`JsonSerial`].
//! Thing records serialize to their whitelisted properties only, in
//! whitelist order, preceded by `@context` (when attached) and `@type`. A
//! [`Property`] holding exactly one value serializes as that value; plain
//! lists are always arrays.

pub mod error;
pub mod jsonld;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Number, Value};

pub use error::{SerializeError, SerializeResult};
pub use jsonld::{has_context, to_json_ld, with_context};

use crate::enums::EnumValue;
use crate::schema::{DataClass, FieldValue, Property, Record};
use crate::structured_data::{
    Duration, Energy, ItemList, ListEntry, ListItem, Mass, Url, format_datetime,
};

/// Conversion into a plain JSON value
pub trait JsonSerial {
    fn json_serial(&self) -> SerializeResult<Value>;
}

impl JsonSerial for Record {
    fn json_serial(&self) -> SerializeResult<Value> {
        let mut out = Map::new();
        match self.schema().properties() {
            Some(properties) => {
                if let Some(context) = self.context() {
                    out.insert("@context".to_string(), Value::String(context.to_string()));
                }
                out.insert("@type".to_string(), Value::String(self.type_name().to_string()));
                for &wire in properties {
                    let Some(spec) = self.schema().field_by_wire_name(wire) else {
                        continue;
                    };
                    if let Some(value) = self.get(spec.name()) {
                        out.insert(wire.to_string(), value.json_serial()?);
                    }
                }
            }
            None => {
                for spec in self.schema().fields() {
                    if let Some(value) = self.get(spec.name()) {
                        out.insert(spec.wire_name().to_string(), value.json_serial()?);
                    }
                }
            }
        }
        Ok(Value::Object(out))
    }
}

impl<T: DataClass> JsonSerial for T {
    fn json_serial(&self) -> SerializeResult<Value> {
        self.record().json_serial()
    }
}

impl JsonSerial for FieldValue {
    fn json_serial(&self) -> SerializeResult<Value> {
        match self {
            FieldValue::Boolean(b) => Ok(Value::Bool(*b)),
            FieldValue::Integer(i) => Ok(Value::from(*i)),
            FieldValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| SerializeError::NotSerializable(format!("float ({})", f))),
            FieldValue::Text(s) => Ok(Value::String(s.clone())),
            FieldValue::Url(url) => url.json_serial(),
            FieldValue::Date(date) => date.json_serial(),
            FieldValue::DateTime(dt) => dt.json_serial(),
            FieldValue::Duration(duration) => duration.json_serial(),
            FieldValue::Energy(energy) => energy.json_serial(),
            FieldValue::Mass(mass) => mass.json_serial(),
            FieldValue::Enum(value) => value.json_serial(),
            FieldValue::Record(record) => record.json_serial(),
            FieldValue::List(values) => values
                .iter()
                .map(JsonSerial::json_serial)
                .collect::<SerializeResult<Vec<_>>>()
                .map(Value::Array),
            FieldValue::Property(property) => property.json_serial(),
            FieldValue::Map(map) => Ok(Value::Object(map.clone())),
            FieldValue::Json(value) => Ok(value.clone()),
        }
    }
}

impl JsonSerial for Property {
    fn json_serial(&self) -> SerializeResult<Value> {
        match self.values() {
            [single] => single.json_serial(),
            values => values
                .iter()
                .map(JsonSerial::json_serial)
                .collect::<SerializeResult<Vec<_>>>()
                .map(Value::Array),
        }
    }
}

impl JsonSerial for EnumValue {
    fn json_serial(&self) -> SerializeResult<Value> {
        Ok(Value::String(self.wire.to_string()))
    }
}

impl JsonSerial for Url {
    fn json_serial(&self) -> SerializeResult<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl JsonSerial for NaiveDate {
    fn json_serial(&self) -> SerializeResult<Value> {
        Ok(Value::String(self.format("%Y-%m-%d").to_string()))
    }
}

impl JsonSerial for DateTime<FixedOffset> {
    fn json_serial(&self) -> SerializeResult<Value> {
        Ok(Value::String(format_datetime(self)))
    }
}

impl JsonSerial for Duration {
    fn json_serial(&self) -> SerializeResult<Value> {
        Ok(Value::String(self.iso_format()))
    }
}

impl JsonSerial for Energy {
    fn json_serial(&self) -> SerializeResult<Value> {
        if !self.value.is_finite() {
            return Err(SerializeError::NotSerializable("Energy".to_string()));
        }
        Ok(Value::String(self.to_string()))
    }
}

impl JsonSerial for Mass {
    fn json_serial(&self) -> SerializeResult<Value> {
        if !self.value.is_finite() {
            return Err(SerializeError::NotSerializable("Mass".to_string()));
        }
        Ok(Value::String(self.to_string()))
    }
}

impl JsonSerial for ListItem {
    fn json_serial(&self) -> SerializeResult<Value> {
        let mut out = Map::new();
        out.insert("@type".to_string(), Value::String("ListItem".to_string()));
        out.insert("position".to_string(), Value::from(self.position));
        match &self.entry {
            ListEntry::Url(url) => out.insert("url".to_string(), url.json_serial()?),
            ListEntry::Item(record) => out.insert("item".to_string(), record.json_serial()?),
        };
        Ok(Value::Object(out))
    }
}

impl JsonSerial for ItemList {
    fn json_serial(&self) -> SerializeResult<Value> {
        let mut out = Map::new();
        if let Some(context) = self.context() {
            out.insert("@context".to_string(), Value::String(context.to_string()));
        }
        out.insert("@type".to_string(), Value::String("ItemList".to_string()));
        let elements = self
            .elements()
            .iter()
            .map(JsonSerial::json_serial)
            .collect::<SerializeResult<Vec<_>>>()?;
        out.insert("itemListElement".to_string(), Value::Array(elements));
        out.insert(
            "itemListOrder".to_string(),
            Value::String(self.order().to_string()),
        );
        out.insert("numberOfItems".to_string(), Value::from(self.number_of_items()));
        Ok(Value::Object(out))
    }
}

impl<T: JsonSerial> JsonSerial for Option<T> {
    fn json_serial(&self) -> SerializeResult<Value> {
        match self {
            Some(value) => value.json_serial(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: JsonSerial> JsonSerial for [T] {
    fn json_serial(&self) -> SerializeResult<Value> {
        self.iter()
            .map(JsonSerial::json_serial)
            .collect::<SerializeResult<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<T: JsonSerial> JsonSerial for Vec<T> {
    fn json_serial(&self) -> SerializeResult<Value> {
        self.as_slice().json_serial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConstructOptions, FieldType};
    use crate::structured_data::{Person, Recipe, RecipeOptions, SCHEMA_ORG_CONTEXT};
    use serde_json::json;

    #[test]
    fn test_thing_has_type_and_whitelist_order() {
        let recipe = Recipe::build(
            json!({
                "recipeIngredient": ["flour", "sugar"],
                "name": "Coffee Cake",
                "image": "https://example.com/photos/1x1/photo.jpg",
            }),
            &RecipeOptions::new(),
        )
        .unwrap();
        let value = recipe.json_serial().unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["@type", "name", "image", "recipeIngredient"]);
        assert_eq!(value["image"], json!("https://example.com/photos/1x1/photo.jpg"));
        assert_eq!(value["recipeIngredient"], json!(["flour", "sugar"]));
    }

    #[test]
    fn test_context_comes_first() {
        let person = Person::named("Mary Stone").unwrap();
        let value = person.into_record().with_context(SCHEMA_ORG_CONTEXT).json_serial().unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["@context", "@type", "name"]);
    }

    #[test]
    fn test_plain_list_never_collapses() {
        let list = FieldValue::List(vec![FieldValue::from("only")]);
        assert_eq!(list.json_serial().unwrap(), json!(["only"]));
        let property = Property::with_values(FieldType::Text, vec![FieldValue::from("only")]).unwrap();
        assert_eq!(property.json_serial().unwrap(), json!("only"));
        assert_eq!(Property::new(FieldType::Text).json_serial().unwrap(), json!([]));
    }

    #[test]
    fn test_non_finite_float_is_not_serializable() {
        assert!(matches!(
            FieldValue::Float(f64::INFINITY).json_serial(),
            Err(SerializeError::NotSerializable(_))
        ));
    }

    #[test]
    fn test_data_class_serializes_through_record() {
        let person = Person::construct(json!({"name": "Mary"}), &ConstructOptions::strict()).unwrap();
        assert_eq!(person.json_serial().unwrap(), json!({"@type": "Person", "name": "Mary"}));
    }
}
