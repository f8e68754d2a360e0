//! Reusable field initializers
//!
//! Initializers read their fixed options through [`InitContext::option`].

use serde_json::Value;

use super::error::CoercionError;
use super::field::InitContext;
use super::value::FieldValue;
use crate::codec::{
    DateOrder, json_kind, parse_date, parse_str_unicode, parse_vulgar_fraction, read_numeral,
    trim_spaces,
};
use crate::structured_data::parse_date_or_datetime;

fn expect_string(raw: Value, expected: &str) -> Result<String, CoercionError> {
    match raw {
        Value::String(s) => Ok(s),
        other => Err(CoercionError::mismatch(expected, json_kind(&other))),
    }
}

/// Separator-delimited date.
///
/// Options: `sep` (default `/`) and `order` (`MDY`, `DMY` or `YMD`,
/// default `MDY`).
pub fn delimited_date(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    let text = expect_string(raw, "date")?;
    let sep = ctx.option("sep").unwrap_or("/");
    let order = match ctx.option("order") {
        Some(order) => order.parse::<DateOrder>()?,
        None => DateOrder::Mdy,
    };
    Ok(FieldValue::Date(parse_date(&text, sep, order)?))
}

/// ISO date-time, or a bare ISO date read as midnight UTC
pub fn date_or_datetime(raw: Value, _ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    let text = expect_string(raw, "date-time")?;
    Ok(FieldValue::DateTime(parse_date_or_datetime(&text)?))
}

/// Text with literal `\uXXXX` escapes repaired and spaces collapsed
pub fn clean_text(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    match raw {
        Value::String(s) => Ok(FieldValue::Text(trim_spaces(&parse_str_unicode(&s)))),
        other => ctx.coerce(other),
    }
}

/// A number, or text holding a vulgar fraction such as `1½`
pub fn fraction(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    match raw {
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(value) => Ok(FieldValue::Float(value)),
            Err(_) => Ok(FieldValue::Float(parse_vulgar_fraction(&s)?)),
        },
        other => ctx.coerce(other),
    }
}

/// An integer, or a numeral word from one to twelve
pub fn numeral(raw: Value, ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    match raw {
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(value) => Ok(FieldValue::Integer(value)),
            Err(_) => Ok(FieldValue::Integer(read_numeral(&s)?)),
        },
        other => ctx.coerce(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConstructOptions, ConstructionError, FieldType, Schema};
    use chrono::NaiveDate;
    use once_cell::sync::Lazy;
    use serde_json::json;

    static MEASURE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
        Schema::builder("Measure")
            .field_with("published", FieldType::Date, delimited_date, &[])
            .field_with("released", FieldType::Date, delimited_date, &[("sep", "-"), ("order", "YMD")])
            .field_with("label", FieldType::Text, clean_text, &[])
            .field_with("amount", FieldType::Float, fraction, &[])
            .field_with("servings", FieldType::Integer, numeral, &[])
            .field_with("updated", FieldType::DateTime, date_or_datetime, &[])
            .build()
            .unwrap()
    });

    fn measure() -> &'static Schema {
        &MEASURE_SCHEMA
    }

    #[test]
    fn test_initializers_with_options() {
        let record = measure()
            .construct(
                json!({
                    "published": "03/10/2018",
                    "released": "2019-04-01",
                    "label": r"½  cup",
                    "amount": "1½",
                    "servings": "Four",
                    "updated": "2018-03-10",
                }),
                &ConstructOptions::strict(),
            )
            .unwrap();
        assert_eq!(record.get_date("published"), NaiveDate::from_ymd_opt(2018, 3, 10));
        assert_eq!(record.get_date("released"), NaiveDate::from_ymd_opt(2019, 4, 1));
        assert_eq!(record.get_str("label"), Some("½ cup"));
        assert_eq!(record.get_f64("amount"), Some(1.5));
        assert_eq!(record.get_i64("servings"), Some(4));
        assert!(record.get_datetime("updated").is_some());
    }

    #[test]
    fn test_numbers_pass_through() {
        let record = measure()
            .construct(json!({"amount": 2, "servings": 6}), &ConstructOptions::strict())
            .unwrap();
        assert_eq!(record.get_f64("amount"), Some(2.0));
        assert_eq!(record.get_i64("servings"), Some(6));
    }

    #[test]
    fn test_impossible_date_is_a_coercion_failure() {
        let err = measure()
            .construct(json!({"published": "13/40/2018"}), &ConstructOptions::strict())
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::CoercionFailure { ref field, source: CoercionError::Codec(_), .. }
                if field == "published"
        ));
    }

    #[test]
    fn test_wrong_kind_is_a_type_mismatch() {
        let err = measure()
            .construct(json!({"published": 20180310}), &ConstructOptions::strict())
            .unwrap_err();
        assert!(matches!(err, ConstructionError::TypeMismatch { .. }));
    }
}
