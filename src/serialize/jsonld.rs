//! JSON-LD text helpers

use tracing::warn;

use super::JsonSerial;
use super::error::{SerializeError, SerializeResult};

/// Compact single-line JSON text of a serializable value
pub fn to_json_ld<T: JsonSerial + ?Sized>(value: &T) -> SerializeResult<String> {
    Ok(serde_json::to_string(&value.json_serial()?)?)
}

/// Whether the text already names a `@context`
pub fn has_context(json_ld: &str) -> bool {
    json_ld.contains("\"@context\"")
}

/// Prepend `"@context"` to minified JSON-LD object text.
///
/// # Examples
///
/// ```
/// use datatrans::serialize::with_context;
///
/// let text = with_context(r#"{"@type":"Person","name":"Mary"}"#, "https://schema.org/").unwrap();
/// assert_eq!(text, r#"{"@context":"https://schema.org/","@type":"Person","name":"Mary"}"#);
/// assert!(with_context(&text, "https://schema.org/").is_err());
/// ```
pub fn with_context(json_ld: &str, context: &str) -> SerializeResult<String> {
    let Some(body) = json_ld
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Err(SerializeError::InvalidJsonLd(
            "expected a JSON object".to_string(),
        ));
    };
    if has_context(json_ld) {
        return Err(SerializeError::ContextAlreadyPresent);
    }

    let context = serde_json::to_string(context)?;
    if body.is_empty() {
        return Ok(format!("{{\"@context\":{}}}", context));
    }
    if !body.starts_with('"') {
        return Err(SerializeError::InvalidJsonLd(
            "expected minified JSON-LD".to_string(),
        ));
    }
    if !json_ld.contains("\"@type\"") {
        warn!("Adding @context to JSON-LD without @type");
    }
    Ok(format!("{{\"@context\":{},{}}}", context, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured_data::Duration;

    #[test]
    fn test_to_json_ld_is_compact() {
        assert_eq!(to_json_ld(&Duration::from_minutes(50)).unwrap(), "\"PT50M\"");
        assert_eq!(
            to_json_ld(&vec![Duration::from_minutes(1), Duration::from_minutes(2)]).unwrap(),
            "[\"PT1M\",\"PT2M\"]"
        );
    }

    #[test]
    fn test_has_context() {
        assert!(has_context(r#"{"@context":"https://schema.org/","@type":"Recipe"}"#));
        assert!(!has_context(r#"{"@type":"Recipe"}"#));
    }

    #[test]
    fn test_with_context_rejects_non_objects() {
        assert!(matches!(
            with_context("[1,2]", "https://schema.org/"),
            Err(SerializeError::InvalidJsonLd(_))
        ));
        assert!(matches!(
            with_context("{ \"@type\": \"Recipe\" }", "https://schema.org/"),
            Err(SerializeError::InvalidJsonLd(_))
        ));
    }

    #[test]
    fn test_with_context_on_empty_object() {
        assert_eq!(
            with_context("{}", "https://schema.org/").unwrap(),
            r#"{"@context":"https://schema.org/"}"#
        );
    }
}
