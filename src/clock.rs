//! Wall-clock and advance-time utilities.
//!
//! Booking requests carry `HH:MM` 24-hour wall-clock strings and a
//! calendar date. This module converts those into the two quantities the
//! evaluators reason about: the booking's elapsed duration in hours, and
//! how far in advance of the evaluation clock the booking starts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A wall-clock time of day (`HH:MM`, 24-hour).
///
/// # Examples
///
/// ```
/// use bookable::ClockTime;
///
/// let t: ClockTime = "09:30".parse().unwrap();
/// assert_eq!(t.minutes_from_midnight(), 570);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Creates a clock time from hour and minute components.
    ///
    /// Returns `None` if `hour > 23` or `minute > 59`.
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes_from_midnight(&self) -> u16 {
        self.minutes
    }

    /// The hour component (0..=23).
    #[must_use]
    pub const fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    /// The minute component (0..=59).
    #[must_use]
    pub const fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    fn as_naive(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .expect("components are range-checked at construction")
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidClockTime {
            input: s.to_string(),
        };

        let (hh, mm) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hh.parse().map_err(|_| invalid())?;
        let minute: u8 = mm.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Elapsed hours between a start and end wall-clock time on one day.
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveDuration`] when `end <= start`.
/// This is the engine's hard stop: no rule family runs on a booking whose
/// end does not come after its start.
pub fn duration_hours(start: ClockTime, end: ClockTime) -> Result<f64, ValidationError> {
    let span =
        i32::from(end.minutes_from_midnight()) - i32::from(start.minutes_from_midnight());
    if span <= 0 {
        return Err(ValidationError::NonPositiveDuration);
    }
    Ok(f64::from(span) / 60.0)
}

/// Hours between the evaluation clock and the booking's start timestamp.
///
/// Deliberately timestamp-based rather than date-only: a booking three
/// calendar days out evaluated at noon reads as 2.x days of advance, not
/// 3. Advance-window comparisons inherit that behavior.
#[must_use]
pub fn advance_hours(now: DateTime<Utc>, date: NaiveDate, start: ClockTime) -> f64 {
    let booking_start = date.and_time(start.as_naive()).and_utc();
    (booking_start - now).num_minutes() as f64 / 60.0
}

/// Days between the evaluation clock and the booking's start timestamp.
#[must_use]
pub fn advance_days(now: DateTime<Utc>, date: NaiveDate, start: ClockTime) -> f64 {
    advance_hours(now, date, start) / 24.0
}

/// The full English weekday name for a calendar date.
///
/// Rule data constrains days with full names (`"Monday"`..`"Sunday"`), so
/// this is the form evaluators match against.
#[must_use]
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
