//! schema.org scalar data types: URL, Date, DateTime

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, CodecResult};

/// An absolute `http://` or `https://` URL
///
/// Validation is a text check, not a parse: the value must contain an
/// `http://` or `https://` prefix followed by at least one character. Host,
/// path and escaping are not inspected, so scraped values with leading text
/// or unescaped spaces pass unchanged. Callers needing component access
/// should parse [`Url::as_str`] with the `url` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Url(String);

impl Url {
    /// Check whether `text` would be accepted by [`Url::parse`]
    pub fn is_url(text: &str) -> bool {
        (text.contains("http://") && text.len() > "http://".len())
            || (text.contains("https://") && text.len() > "https://".len())
    }

    /// Validate and wrap a URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use datatrans::structured_data::Url;
    ///
    /// assert!(Url::parse("https://example.com/photos/1x1/photo.jpg").is_ok());
    /// assert!(Url::parse("https://").is_err());
    /// assert!(Url::parse("example.com").is_err());
    /// ```
    pub fn parse(text: &str) -> CodecResult<Self> {
        if Self::is_url(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(CodecError::InvalidFormat(format!(
                "'{}' is not a valid URL",
                text
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Url {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Url {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_url(&value) {
            Ok(Self(value))
        } else {
            Err(CodecError::InvalidFormat(format!(
                "'{}' is not a valid URL",
                value
            )))
        }
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.0
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse an ISO 8601 calendar date (`2018-03-10`)
pub fn parse_iso_date(text: &str) -> CodecResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| {
        CodecError::InvalidFormat(format!("'{}' is not an ISO date: {}", text, e))
    })
}

/// Parse an ISO 8601 date-time.
///
/// A trailing `Z` means UTC and a missing offset is read as UTC. The date
/// and time may be separated by `T` or a single space.
///
/// # Examples
///
/// ```
/// use datatrans::structured_data::parse_iso_datetime;
///
/// let dt = parse_iso_datetime("2018-03-10T12:05:00Z").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2018-03-10T12:05:00+00:00");
/// assert!(parse_iso_datetime("10 March 2018").is_err());
/// ```
pub fn parse_iso_datetime(text: &str) -> CodecResult<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(CodecError::InvalidFormat(format!(
        "'{}' is not an ISO date-time",
        text
    )))
}

/// Like [`parse_iso_datetime`], but a bare date is accepted as midnight UTC
pub fn parse_date_or_datetime(text: &str) -> CodecResult<DateTime<FixedOffset>> {
    parse_iso_datetime(text).or_else(|err| {
        parse_iso_date(text)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc().fixed_offset())
            .ok_or(err)
    })
}

/// ISO 8601 text of a date-time, `Z` written as `+00:00`
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339()
}
