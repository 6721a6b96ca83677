//! Quota rules: usage ceilings per user segment.

use serde::{Deserialize, Serialize};

use crate::duration::DurationValue;

use super::TimeWindow;

/// Which requester population a quota governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaTarget {
    /// Every individual requester.
    Individuals,
    /// Requesters holding at least one of the rule's tags.
    IndividualsWithTags,
    /// Requesters holding no tags at all.
    IndividualsWithNoTags,
    /// The tagged group as a whole, sharing one ceiling.
    GroupWithTag,
    /// Target not recognized by this engine version.
    #[serde(other)]
    Unknown,
}

/// What the quota counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaType {
    /// Booked time (duration ceiling).
    Time,
    /// Number of bookings. Modeled, not yet evaluated.
    Count,
}

/// The rolling period a quota resets over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPeriod {
    /// Per calendar day.
    Day,
    /// Per calendar week.
    Week,
    /// Per calendar month.
    Month,
    /// A ceiling on concurrent holdings, never resetting.
    AtAnyTime,
}

impl QuotaPeriod {
    /// Human label used in rejection messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Day => "per day",
            Self::Week => "per week",
            Self::Month => "per month",
            Self::AtAnyTime => "at any time",
        }
    }
}

/// Whether a quota counts all bookings or only those inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsiderationTime {
    /// Count bookings regardless of time of day.
    AnyTime,
    /// Count only bookings inside `time_range`/`days`.
    SpecificTime,
}

impl Default for ConsiderationTime {
    fn default() -> Self {
        Self::AnyTime
    }
}

/// The quota ceiling: a duration string for time quotas, an integer for
/// count quotas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuotaValue {
    /// Numeric ceiling (hours for time quotas, bookings for count quotas).
    Number(f64),
    /// Duration string such as `"4h"`.
    Text(String),
}

impl QuotaValue {
    /// The ceiling in hours, if interpretable as a duration.
    #[must_use]
    pub fn as_hours(&self) -> Option<f64> {
        match self {
            Self::Number(hours) => Some(*hours),
            Self::Text(raw) => raw.parse::<DurationValue>().ok().map(|d| d.as_hours()),
        }
    }
}

/// A usage ceiling for a requester segment over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaRule {
    /// Which requester population the ceiling governs.
    pub target: QuotaTarget,
    /// Tags selecting the population, when the target is tag-scoped.
    #[serde(default)]
    pub tags: Vec<String>,
    /// What the ceiling counts.
    pub quota_type: QuotaType,
    /// The ceiling itself.
    pub value: QuotaValue,
    /// How often the ceiling resets.
    pub period: QuotaPeriod,
    /// Spaces the ceiling covers.
    #[serde(default)]
    pub affected_spaces: Vec<String>,
    /// Whether only bookings inside a window count.
    #[serde(default)]
    pub consideration_time: ConsiderationTime,
    /// Window for `specific_time` consideration.
    #[serde(default)]
    pub time_range: Option<TimeWindow>,
    /// Weekdays for `specific_time` consideration.
    #[serde(default)]
    pub days: Option<Vec<String>>,
    /// Author's rationale.
    #[serde(default)]
    pub explanation: Option<String>,
}
