//! Quantity text: vulgar fractions and small numerals

use serde_json::Value;

use super::error::{CodecError, CodecResult};

/// The fraction-numerator-one glyph, followed by a denominator (`⅟100`)
const FRACTION_NUMERATOR_ONE: char = '⅟';

/// Unicode vulgar fraction glyphs and their values
const VULGAR_FRACTIONS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅐', 1.0 / 7.0),
    ('⅑', 1.0 / 9.0),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
    ('↉', 0.0),
];

/// Numerals accepted by [`read_numeral`]
const NUMERALS: &[(&str, i64)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
];

fn glyph_value(c: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| *value)
}

/// A finite decimal number; `inf` and `NaN` are rejected
fn parse_number(text: &str, whole: &str) -> CodecResult<f64> {
    whole
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| {
            CodecError::InvalidFormat(format!("'{}' in '{}' is not a number", whole, text))
        })
}

/// Whole-number part preceding a fraction; empty means zero.
fn parse_whole(text: &str, whole: &str) -> CodecResult<f64> {
    if whole.trim().is_empty() {
        Ok(0.0)
    } else {
        parse_number(text, whole)
    }
}

/// `a/b`, optionally preceded by a whole number and whitespace (`1 1/2`).
fn parse_ascii_fraction(text: &str) -> Option<CodecResult<f64>> {
    let (head, denominator) = text.split_once('/')?;
    if denominator.contains('/') {
        return None;
    }
    let head = head.trim();
    let (whole, numerator) = match head.rsplit_once(char::is_whitespace) {
        Some((whole, numerator)) => (whole, numerator),
        None => ("", head),
    };
    Some(combine_ascii(text, whole, numerator, denominator))
}

fn combine_ascii(text: &str, whole: &str, numerator: &str, denominator: &str) -> CodecResult<f64> {
    let whole = parse_whole(text, whole)?;
    let numerator = parse_number(text, numerator)?;
    let denominator = parse_number(text, denominator)?;
    if denominator == 0.0 {
        return Err(CodecError::InvalidFormat(format!(
            "'{}' has a zero denominator",
            text
        )));
    }
    Ok(whole + numerator / denominator)
}

fn parse_unicode_fraction(text: &str) -> CodecResult<f64> {
    if let Some((whole, denominator)) = text.rsplit_once(FRACTION_NUMERATOR_ONE) {
        let denominator = parse_number(text, denominator)?;
        if denominator == 0.0 {
            return Err(CodecError::InvalidFormat(format!(
                "'{}' has a zero denominator",
                text
            )));
        }
        return Ok(parse_whole(text, whole)? + 1.0 / denominator);
    }

    let last = text
        .chars()
        .last()
        .ok_or_else(|| CodecError::InvalidFormat("empty string is not a fraction".to_string()))?;
    let fraction = glyph_value(last).ok_or_else(|| {
        CodecError::InvalidFormat(format!(
            "invalid string '{}', '{}' is not a vulgar fraction",
            text, last
        ))
    })?;
    let whole = &text[..text.len() - last.len_utf8()];
    Ok(parse_whole(text, whole)? + fraction)
}

/// Convert text containing a vulgar fraction to a float.
///
/// Accepts an ASCII fraction (`1/2`, `1 1/2`), a unicode glyph with an optional
/// whole part (`¾`, `1½`) or the numerator-one form (`3⅟100`).
///
/// # Examples
///
/// ```
/// use datatrans::codec::parse_vulgar_fraction;
///
/// assert_eq!(parse_vulgar_fraction("¾").unwrap(), 0.75);
/// assert_eq!(parse_vulgar_fraction("1½").unwrap(), 1.5);
/// assert_eq!(parse_vulgar_fraction("1/2").unwrap(), 0.5);
/// assert!(parse_vulgar_fraction("three quarters").is_err());
/// ```
pub fn parse_vulgar_fraction(text: &str) -> CodecResult<f64> {
    let text = text.trim();
    let value = match parse_ascii_fraction(text) {
        Some(Ok(value)) => value,
        _ => parse_unicode_fraction(text)?,
    };
    if !value.is_finite() {
        return Err(CodecError::InvalidFormat(format!("'{}' is out of range", text)));
    }
    Ok(value)
}

/// [`parse_vulgar_fraction`] over an arbitrary JSON value.
///
/// Anything but a JSON string is an [`CodecError::InvalidArgument`].
pub fn parse_vulgar_fraction_value(value: &Value) -> CodecResult<f64> {
    match value {
        Value::String(text) => parse_vulgar_fraction(text),
        other => Err(CodecError::InvalidArgument(format!(
            "invalid argument of type '{}'",
            json_kind(other)
        ))),
    }
}

/// Convert a numeral word under thirteen to an integer.
///
/// Case and spaces are ignored: `"  ten "` and `"ELEVEN"` both parse.
pub fn read_numeral(text: &str) -> CodecResult<i64> {
    let normalized: String = text
        .split(' ')
        .collect::<String>()
        .to_lowercase();
    NUMERALS
        .iter()
        .find(|(word, _)| *word == normalized)
        .map(|(_, value)| *value)
        .ok_or_else(|| CodecError::InvalidFormat(format!("cannot parse '{}' as numerals", text)))
}

/// Name of a JSON value's kind, used in error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_unicode_glyphs() {
        assert_eq!(parse_vulgar_fraction("¾").unwrap(), 0.75);
        assert_eq!(parse_vulgar_fraction("1½").unwrap(), 1.5);
        assert_eq!(parse_vulgar_fraction("¼").unwrap(), 0.25);
        assert!(close(parse_vulgar_fraction("⅓").unwrap(), 1.0 / 3.0));
    }

    #[test]
    fn test_numerator_one() {
        assert!(close(parse_vulgar_fraction("3⅟100").unwrap(), 3.01));
        assert!(close(parse_vulgar_fraction("⅟8").unwrap(), 0.125));
    }

    #[test]
    fn test_ascii_fractions() {
        assert_eq!(parse_vulgar_fraction("1/2").unwrap(), 0.5);
        assert_eq!(parse_vulgar_fraction("2 3/4").unwrap(), 2.75);
        assert!(parse_vulgar_fraction("1/0").is_err());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for text in ["inf/2", "NaN/2", "1/inf", "infinity½", "NaN⅟2", "1e308/1e-308"] {
            assert!(
                matches!(parse_vulgar_fraction(text), Err(CodecError::InvalidFormat(_))),
                "{} parsed",
                text
            );
        }
    }

    #[test]
    fn test_invalid_text() {
        assert!(matches!(
            parse_vulgar_fraction(""),
            Err(CodecError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_vulgar_fraction("three quarters"),
            Err(CodecError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_vulgar_fraction("⅟"),
            Err(CodecError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_non_string_argument() {
        assert!(matches!(
            parse_vulgar_fraction_value(&json!(5)),
            Err(CodecError::InvalidArgument(_))
        ));
        assert_eq!(parse_vulgar_fraction_value(&json!("½")).unwrap(), 0.5);
    }

    #[test]
    fn test_read_numeral() {
        assert_eq!(read_numeral("One").unwrap(), 1);
        assert_eq!(read_numeral("seven ").unwrap(), 7);
        assert_eq!(read_numeral("  ten ").unwrap(), 10);
        assert_eq!(read_numeral("ELEVEN").unwrap(), 11);
        assert!(read_numeral("thirteen").is_err());
    }
}
