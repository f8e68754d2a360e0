//! schema.org AggregateRating

use serde_json::Value;

use crate::data_class;
use crate::schema::{DataClass, FieldType, FieldValue, Record, Schema};

data_class! {
    /// Average rating of an item.
    ///
    /// `ratingValue` and at least one of `ratingCount` or `reviewCount` are
    /// required. Missing `bestRating` and `worstRating` mean a 1 to 5 scale.
    pub struct AggregateRating => Schema::builder("AggregateRating")
        .field("rating_value", FieldType::Json)
        .field("rating_count", FieldType::Integer)
        .field("review_count", FieldType::Integer)
        .field("best_rating", FieldType::Float)
        .field("worst_rating", FieldType::Float)
        .thing(&[
            "ratingValue",
            "ratingCount",
            "reviewCount",
            "bestRating",
            "worstRating",
        ])
        .validate(check_rating)
        .build();
}

fn check_rating(record: &Record) -> Result<(), String> {
    match record.get("rating_value").map(|value| value.to_wire()) {
        Some(Value::Number(_) | Value::String(_)) => {}
        Some(_) => return Err("ratingValue must be a number or text".to_string()),
        None => return Err("ratingValue is required".to_string()),
    }
    if !record.is_set("rating_count") && !record.is_set("review_count") {
        return Err("at least one of 'ratingCount' or 'reviewCount' is required".to_string());
    }
    Ok(())
}

impl AggregateRating {
    pub fn rating_value(&self) -> Option<&Value> {
        match self.record().get("rating_value") {
            Some(FieldValue::Json(value)) => Some(value),
            _ => None,
        }
    }

    pub fn rating_count(&self) -> Option<i64> {
        self.record().get_i64("rating_count")
    }

    pub fn review_count(&self) -> Option<i64> {
        self.record().get_i64("review_count")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConstructOptions, ConstructionError};
    use serde_json::json;

    #[test]
    fn test_rating_with_review_count() {
        let rating = AggregateRating::construct(
            json!({"ratingValue": 4.6, "reviewCount": 564, "worstRating": 0}),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert_eq!(rating.review_count(), Some(564));
        assert_eq!(rating.rating_value(), Some(&json!(4.6)));
    }

    #[test]
    fn test_rating_needs_a_count() {
        let err = AggregateRating::construct(json!({"ratingValue": 5}), &ConstructOptions::strict())
            .unwrap_err();
        assert!(matches!(err, ConstructionError::InvariantViolation { .. }));
    }

    #[test]
    fn test_rating_value_may_be_text() {
        assert!(AggregateRating::construct(
            json!({"ratingValue": "60%", "ratingCount": 10}),
            &ConstructOptions::strict()
        )
        .is_ok());
        assert!(AggregateRating::construct(
            json!({"ratingValue": [4], "ratingCount": 10}),
            &ConstructOptions::strict()
        )
        .is_err());
    }
}
