//! snake_case / camelCase translation for wire names

use super::error::{CodecError, CodecResult};

/// Convert a snake_case name to its camelCase wire name.
///
/// Empty segments are dropped, so leading, trailing and doubled underscores
/// disappear. A name without underscores is returned unchanged.
///
/// # Examples
///
/// ```
/// use datatrans::codec::snake_to_camel;
///
/// assert_eq!(snake_to_camel("snake_to_camel"), "snakeToCamel");
/// assert_eq!(snake_to_camel("__snake_to_camel__"), "snakeToCamel");
/// assert_eq!(snake_to_camel("snakeToCamel"), "snakeToCamel");
/// ```
pub fn snake_to_camel(name: &str) -> String {
    let mut segments = name.split('_').filter(|s| !s.is_empty());
    let mut camel = match segments.next() {
        Some(first) => first.to_string(),
        None => return String::new(),
    };
    for segment in segments {
        camel.push_str(&title_case(segment));
    }
    camel
}

/// Uppercase the first character and lowercase the rest.
fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Convert a camelCase wire name back to snake_case.
///
/// Names that already contain an underscore are rejected: the round trip
/// would be ambiguous.
///
/// # Examples
///
/// ```
/// use datatrans::codec::camel_to_snake;
///
/// assert_eq!(camel_to_snake("fdcId").unwrap(), "fdc_id");
/// assert!(camel_to_snake("fdc_id").is_err());
/// ```
pub fn camel_to_snake(name: &str) -> CodecResult<String> {
    if name.contains('_') {
        return Err(CodecError::InvalidFormat(format!(
            "'{}' already contains an underscore",
            name
        )));
    }

    let mut snake = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            snake.push('_');
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    Ok(snake)
}
