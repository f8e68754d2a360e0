//! Free-text cleanup

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// A literal backslash, 'u', then exactly four hex digits
static UNICODE_ESCAPE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").unwrap());

/// Replace literal `\uXXXX` escapes left in already-decoded text with the
/// characters they name.
///
/// Backslashes that do not start a four-hex-digit escape are kept, as are
/// escapes naming a lone surrogate.
///
/// # Examples
///
/// ```
/// use datatrans::codec::parse_str_unicode;
///
/// assert_eq!(
///     parse_str_unicode(r"\u00be cup (1\u00bd sticks) butter"),
///     "¾ cup (1½ sticks) butter"
/// );
/// assert_eq!(parse_str_unicode(r"C:\users"), r"C:\users");
/// ```
pub fn parse_str_unicode(text: &str) -> String {
    UNICODE_ESCAPE_REGEX
        .replace_all(text, |caps: &Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Collapse runs of spaces and trim both ends.
///
/// # Examples
///
/// ```
/// use datatrans::codec::trim_spaces;
///
/// assert_eq!(trim_spaces(" CHEDDAR  CHEESE "), "CHEDDAR CHEESE");
/// ```
pub fn trim_spaces(text: &str) -> String {
    text.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_repair() {
        assert_eq!(
            parse_str_unicode(r"cut into \u00bc-inch pieces"),
            "cut into ¼-inch pieces"
        );
        assert_eq!(parse_str_unicode(r"caf\u00E9"), "café");
    }

    #[test]
    fn test_text_without_escapes_is_untouched() {
        let text = "¾ cup (1½ sticks) cold unsalted butter";
        assert_eq!(parse_str_unicode(text), text);
        assert_eq!(parse_str_unicode(r"a \n b \u12 c"), r"a \n b \u12 c");
    }

    #[test]
    fn test_lone_surrogate_is_kept() {
        assert_eq!(parse_str_unicode(r"\ud83d"), r"\ud83d");
    }

    #[test]
    fn test_trim_spaces() {
        assert_eq!(trim_spaces(" pretty"), "pretty");
        assert_eq!(trim_spaces(" salt  "), "salt");
    }
}
