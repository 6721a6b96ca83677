//! The duration value type used throughout rule data.
//!
//! Rule authors write durations as strings: `"2h"`, `"30min"`, or a
//! composite like `"1h30min"`. Historically each evaluator parsed these
//! ad hoc; here the grammar lives in one place and every evaluator works
//! with a single canonical unit (minutes).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Grammar: optional hours component, optional minutes component, at
/// least one of the two. `"m"` is accepted as a shorthand for `"min"`.
fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:(\d+(?:\.\d+)?)\s*h)?\s*(?:(\d+(?:\.\d+)?)\s*(?:min|m))?\s*$")
            .expect("duration regex is valid")
    })
}

/// A duration parsed from rule data, canonically stored in minutes.
///
/// # Examples
///
/// ```
/// use bookable::DurationValue;
///
/// let d: DurationValue = "1h30min".parse().unwrap();
/// assert_eq!(d.as_minutes(), 90.0);
/// assert_eq!(d.as_hours(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DurationValue {
    minutes: f64,
}

impl DurationValue {
    /// Creates a duration from a minute count.
    #[must_use]
    pub const fn from_minutes(minutes: f64) -> Self {
        Self { minutes }
    }

    /// Creates a duration from an hour count.
    #[must_use]
    pub fn from_hours(hours: f64) -> Self {
        Self {
            minutes: hours * 60.0,
        }
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn as_minutes(&self) -> f64 {
        self.minutes
    }

    /// Returns the duration in hours.
    #[must_use]
    pub fn as_hours(&self) -> f64 {
        self.minutes / 60.0
    }

    /// Returns the duration as a whole number of minutes, if it is one.
    #[must_use]
    pub fn whole_minutes(&self) -> Option<u32> {
        let rounded = self.minutes.round();
        if (self.minutes - rounded).abs() < 1e-9 && rounded >= 0.0 {
            Some(rounded as u32)
        } else {
            None
        }
    }
}

impl FromStr for DurationValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDuration {
            input: s.to_string(),
        };

        let captures = duration_regex().captures(s).ok_or_else(invalid)?;
        let hours = captures.get(1).map(|m| m.as_str().parse::<f64>());
        let minutes = captures.get(2).map(|m| m.as_str().parse::<f64>());

        // The regex matches the empty string; require at least one component.
        if hours.is_none() && minutes.is_none() {
            return Err(invalid());
        }

        let hours = hours.transpose().map_err(|_| invalid())?.unwrap_or(0.0);
        let minutes = minutes.transpose().map_err(|_| invalid())?.unwrap_or(0.0);

        Ok(Self::from_minutes(hours * 60.0 + minutes))
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.minutes;
        if total < 0.0 {
            return write!(f, "-{}", Self::from_minutes(-total));
        }
        let hours = (total / 60.0).floor();
        let rest = total - hours * 60.0;
        match (hours > 0.0, rest > 0.0) {
            (true, true) => write!(f, "{hours}h{rest}min"),
            (true, false) => write!(f, "{hours}h"),
            _ => write!(f, "{rest}min"),
        }
    }
}

impl Serialize for DurationValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DurationValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
