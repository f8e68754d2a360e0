//! schema.org quantities: Duration, Energy, Mass
//!
//! Energy and Mass render as `<number> <unit>` text, for example
//! `270 calories` or `7 g`. Durations render as ISO 8601 durations without
//! years, months or weeks.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::codec::{CodecError, CodecResult};
use crate::enums::WireEnum;
use crate::wire_enum;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

static ISO_DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").unwrap()
});

/// A non-negative span of time with one-second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Saturates at `u64::MAX` seconds; see [`Duration::try_from_minutes`]
    pub fn from_minutes(minutes: u64) -> Self {
        Self::from_seconds(minutes.saturating_mul(SECONDS_PER_MINUTE))
    }

    /// Fails when the minute count does not fit in whole seconds
    pub fn try_from_minutes(minutes: u64) -> CodecResult<Self> {
        minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .map(Self::from_seconds)
            .ok_or_else(|| {
                CodecError::InvalidFormat(format!("{} minutes is out of range", minutes))
            })
    }

    pub fn as_seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    /// ISO 8601 text, `P0D` for a zero duration.
    ///
    /// # Examples
    ///
    /// ```
    /// use datatrans::structured_data::Duration;
    ///
    /// assert_eq!(Duration::from_minutes(50).iso_format(), "PT50M");
    /// assert_eq!(Duration::from_seconds(93).iso_format(), "PT1M33S");
    /// assert_eq!(Duration::from_minutes(26 * 60).iso_format(), "P1DT2H");
    /// assert_eq!(Duration::default().iso_format(), "P0D");
    /// ```
    pub fn iso_format(&self) -> String {
        let days = self.seconds / SECONDS_PER_DAY;
        let rest = self.seconds % SECONDS_PER_DAY;
        let hours = rest / SECONDS_PER_HOUR;
        let minutes = (rest % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = rest % SECONDS_PER_MINUTE;

        let mut time = String::new();
        if hours > 0 {
            time.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            time.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 {
            time.push_str(&format!("{}S", seconds));
        }

        match (days, time.is_empty()) {
            (0, true) => "P0D".to_string(),
            (0, false) => format!("PT{}", time),
            (days, true) => format!("P{}D", days),
            (days, false) => format!("P{}DT{}", days, time),
        }
    }

    /// Parse the day/hour/minute/second subset of ISO 8601 durations
    pub fn parse_iso(text: &str) -> CodecResult<Self> {
        let invalid = || CodecError::InvalidFormat(format!("'{}' is not an ISO 8601 duration", text));
        let text = text.trim();
        let caps = ISO_DURATION_REGEX.captures(text).ok_or_else(invalid)?;
        if text == "P" || text.ends_with('T') {
            return Err(invalid());
        }

        let mut seconds = 0u64;
        for (index, scale) in [
            (1, SECONDS_PER_DAY),
            (2, SECONDS_PER_HOUR),
            (3, SECONDS_PER_MINUTE),
            (4, 1),
        ] {
            if let Some(group) = caps.get(index) {
                let count: u64 = group.as_str().parse().map_err(|_| invalid())?;
                seconds = count
                    .checked_mul(scale)
                    .and_then(|part| seconds.checked_add(part))
                    .ok_or_else(invalid)?;
            }
        }
        Ok(Self::from_seconds(seconds))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_format())
    }
}

impl FromStr for Duration {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

wire_enum! {
    /// Units for [`Energy`]
    pub enum EnergyUnit {
        Calorie => "calories",
    }
}

wire_enum! {
    /// Units for [`Mass`]
    pub enum MassUnit {
        Kilogram => "kg",
        Gram => "g",
        Milligram => "mg",
    }
}

/// Split `<number> <unit>` text
fn split_quantity(text: &str) -> CodecResult<(f64, &str)> {
    let mut parts = text.split_whitespace();
    let (Some(number), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CodecError::InvalidFormat(format!(
            "'{}' is not of the form '<number> <unit>'",
            text
        )));
    };
    let value = number.parse::<f64>().map_err(|_| {
        CodecError::InvalidFormat(format!("'{}' in '{}' is not a number", number, text))
    })?;
    Ok((value, unit))
}

/// An amount of energy, e.g. `270 calories`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub value: f64,
    pub unit: EnergyUnit,
}

impl Energy {
    pub fn new(value: f64, unit: EnergyUnit) -> Self {
        Self { value, unit }
    }

    pub fn calories(value: f64) -> Self {
        Self::new(value, EnergyUnit::Calorie)
    }

    pub fn parse(text: &str) -> CodecResult<Self> {
        let (value, unit) = split_quantity(text)?;
        let unit = EnergyUnit::parse(unit).map_err(|e| CodecError::InvalidFormat(e.to_string()))?;
        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.as_wire())
    }
}

/// An amount of mass, e.g. `7 g`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    pub value: f64,
    pub unit: MassUnit,
}

impl Mass {
    pub fn new(value: f64, unit: MassUnit) -> Self {
        Self { value, unit }
    }

    pub fn grams(value: f64) -> Self {
        Self::new(value, MassUnit::Gram)
    }

    pub fn parse(text: &str) -> CodecResult<Self> {
        let (value, unit) = split_quantity(text)?;
        let unit = MassUnit::parse(unit).map_err(|e| CodecError::InvalidFormat(e.to_string()))?;
        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Mass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.as_wire())
    }
}
