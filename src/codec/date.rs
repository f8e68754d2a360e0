//! Separator-delimited calendar dates

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{CodecError, CodecResult};

/// Order of the day, month and year tokens in a date string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateOrder {
    /// month, day, year (FoodData Central)
    Mdy,
    /// day, month, year
    Dmy,
    /// year, month, day
    Ymd,
}

impl DateOrder {
    /// Arrange three tokens as (year, month, day)
    fn arrange(self, tokens: [u32; 3]) -> (u32, u32, u32) {
        let [a, b, c] = tokens;
        match self {
            DateOrder::Mdy => (c, a, b),
            DateOrder::Dmy => (c, b, a),
            DateOrder::Ymd => (a, b, c),
        }
    }
}

impl FromStr for DateOrder {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MDY" => Ok(DateOrder::Mdy),
            "DMY" => Ok(DateOrder::Dmy),
            "YMD" => Ok(DateOrder::Ymd),
            _ => Err(CodecError::InvalidFormat(format!(
                "unknown date order '{}', expected MDY, DMY or YMD",
                s
            ))),
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::Mdy => write!(f, "MDY"),
            DateOrder::Dmy => write!(f, "DMY"),
            DateOrder::Ymd => write!(f, "YMD"),
        }
    }
}

/// Parse a date made of three numeric tokens joined by `sep`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use datatrans::codec::{DateOrder, parse_date};
///
/// let date = parse_date("03/10/2018", "/", DateOrder::Mdy).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2018, 3, 10).unwrap());
/// assert!(parse_date("13/40/2018", "/", DateOrder::Mdy).is_err());
/// ```
pub fn parse_date(text: &str, sep: &str, order: DateOrder) -> CodecResult<NaiveDate> {
    if sep.is_empty() {
        return Err(CodecError::InvalidArgument(
            "date separator cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = text.trim().split(sep).collect();
    if parts.len() != 3 {
        return Err(CodecError::InvalidFormat(format!(
            "'{}' does not have 3 '{}'-separated parts",
            text, sep
        )));
    }

    let mut tokens = [0u32; 3];
    for (slot, part) in tokens.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| {
            CodecError::InvalidFormat(format!("'{}' in '{}' is not a number", part, text))
        })?;
    }

    let (year, month, day) = order.arrange(tokens);
    let year = i32::try_from(year)
        .map_err(|_| CodecError::InvalidFormat(format!("year out of range in '{}'", text)))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CodecError::InvalidFormat(format!("'{}' is not a calendar date ({})", text, order))
    })
}
