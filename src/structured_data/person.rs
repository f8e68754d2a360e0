//! schema.org Person

use serde_json::{Value, json};

use crate::data_class;
use crate::schema::{
    CoercionError, ConstructOptions, ConstructionResult, DataClass, FieldType, FieldValue,
    InitContext, Property, Schema,
};

data_class! {
    /// A person, usually a recipe author or video creator
    pub struct Person => Schema::builder("Person")
        .field("name", FieldType::Text)
        .thing(&["name"])
        .build();
}

impl Person {
    /// A person known only by name
    pub fn named(name: &str) -> ConstructionResult<Self> {
        Self::construct(json!({ "name": name }), &ConstructOptions::strict())
    }

    pub fn name(&self) -> Option<&str> {
        self.record().get_str("name")
    }
}

fn person_value(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    let source = match raw {
        Value::String(name) => json!({ "name": name }),
        other => other,
    };
    ctx.coerce_as(&FieldType::Record(Person::schema), source)
}

/// Initializer for a single person given as a name or an object
pub fn person(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    person_value(raw, ctx)
}

/// Initializer for a repeated person property; names and objects may mix
pub fn people(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    let items = match raw {
        Value::Array(items) => items,
        single => vec![single],
    };
    let values = items
        .into_iter()
        .map(|item| person_value(item, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldValue::Property(Property::with_values(
        FieldType::Record(Person::schema),
        values,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_person() {
        let person = Person::named("Mary Stone").unwrap();
        assert_eq!(person.name(), Some("Mary Stone"));
        assert!(Person::schema().is_thing());
    }

    #[test]
    fn test_person_rejects_unknown_keys() {
        assert!(Person::construct(json!({"name": "Mary", "email": "m@example.com"}), &ConstructOptions::strict()).is_err());
    }
}
