//! The simulation request and its verdict.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{self, ClockTime};

/// Sentinel tag marking an unauthenticated requester.
pub const ANONYMOUS_TAG: &str = "Anonymous";

/// A hypothetical booking to evaluate: who, what space, when.
///
/// # Examples
///
/// ```
/// use bookable::SimulationInput;
/// use chrono::NaiveDate;
///
/// let input = SimulationInput::new(
///     "Desk 1",
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     "09:00".parse().unwrap(),
///     "11:00".parse().unwrap(),
/// )
/// .with_tags(vec!["Staff".to_string()]);
///
/// assert!(!input.is_anonymous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// The requester's tags. Empty, or containing the `"Anonymous"`
    /// sentinel, denotes an unauthenticated requester.
    #[serde(rename = "userTags", default)]
    pub user_tags: Vec<String>,
    /// The target space name.
    pub space: String,
    /// Calendar date of the booking.
    pub date: NaiveDate,
    /// Wall-clock start of the booking.
    #[serde(rename = "startTime")]
    pub start_time: ClockTime,
    /// Wall-clock end of the booking.
    #[serde(rename = "endTime")]
    pub end_time: ClockTime,
}

impl SimulationInput {
    /// Creates an untagged request.
    #[must_use]
    pub fn new(
        space: impl Into<String>,
        date: NaiveDate,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        Self {
            user_tags: Vec::new(),
            space: space.into(),
            date,
            start_time,
            end_time,
        }
    }

    /// Sets the requester's tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.user_tags = tags;
        self
    }

    /// True for unauthenticated or untagged requesters.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.user_tags.is_empty() || self.user_tags.iter().all(|t| t == ANONYMOUS_TAG)
    }

    /// The requester's real tags, with the anonymous sentinel stripped.
    pub fn active_tags(&self) -> impl Iterator<Item = &str> {
        self.user_tags
            .iter()
            .map(String::as_str)
            .filter(|t| *t != ANONYMOUS_TAG)
    }

    /// True when the requester holds at least one of the given tags.
    #[must_use]
    pub fn holds_any_of(&self, tags: &[String]) -> bool {
        self.active_tags().any(|mine| tags.iter().any(|t| t == mine))
    }

    /// The full English weekday name of the booking date.
    #[must_use]
    pub fn weekday_name(&self) -> &'static str {
        clock::weekday_name(self.date)
    }
}

/// The verdict for one simulated booking.
///
/// Rejections are values, never errors: `allowed` is false, `error_reason`
/// explains why, and `violated_rule` carries the offending rule's own
/// explanation when it has one. On success `error_reason` still carries a
/// positive justification (it is not exclusively an error channel) along
/// with the price breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Whether the booking would be accepted.
    pub allowed: bool,
    /// Total price for the booking, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Effective hourly rate, on success (derived for flat rates).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    /// Human label for how the winning rate scales.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_label: Option<String>,
    /// Requested duration in hours, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Why the booking was rejected, or the positive justification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    /// The offending rule's authored explanation, on rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violated_rule: Option<String>,
}

impl SimulationResult {
    /// Builds a rejection verdict.
    #[must_use]
    pub fn rejected(reason: impl Into<String>, violated_rule: Option<String>) -> Self {
        Self {
            allowed: false,
            total_price: None,
            hourly_rate: None,
            rate_label: None,
            duration: None,
            error_reason: Some(reason.into()),
            violated_rule,
        }
    }

    /// Builds an acceptance verdict with its price breakdown.
    #[must_use]
    pub fn allowed(
        total_price: f64,
        hourly_rate: f64,
        rate_label: impl Into<String>,
        duration: f64,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            allowed: true,
            total_price: Some(total_price),
            hourly_rate: Some(hourly_rate),
            rate_label: Some(rate_label.into()),
            duration: Some(duration),
            error_reason: Some(justification.into()),
            violated_rule: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with_tags(tags: &[&str]) -> SimulationInput {
        SimulationInput::new(
            "Desk 1",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            "09:00".parse().unwrap(),
            "10:00".parse().unwrap(),
        )
        .with_tags(tags.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn empty_tags_mean_anonymous() {
        assert!(input_with_tags(&[]).is_anonymous());
        assert!(input_with_tags(&["Anonymous"]).is_anonymous());
        assert!(!input_with_tags(&["Staff"]).is_anonymous());
    }

    #[test]
    fn anonymous_sentinel_never_matches_rule_tags() {
        let input = input_with_tags(&["Anonymous"]);
        assert!(!input.holds_any_of(&["Anonymous".to_string()]));
    }

    #[test]
    fn holds_any_of_intersects_tags() {
        let input = input_with_tags(&["Staff", "Board"]);
        assert!(input.holds_any_of(&["Board".to_string()]));
        assert!(!input.holds_any_of(&["Members".to_string()]));
    }

    #[test]
    fn input_decodes_from_wire_shape() {
        let raw = r#"{
            "userTags": ["Sales Team"],
            "space": "Desk 1",
            "date": "2026-03-02",
            "startTime": "09:00",
            "endTime": "11:30"
        }"#;
        let input: SimulationInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.weekday_name(), "Monday");
        assert_eq!(input.end_time.minutes_from_midnight(), 690);
    }

    #[test]
    fn result_serializes_camel_case_and_omits_empty_fields() {
        let rejected = SimulationResult::rejected("too long", Some("Max 4h".to_string()));
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["allowed"], false);
        assert_eq!(json["errorReason"], "too long");
        assert_eq!(json["violatedRule"], "Max 4h");
        assert!(json.get("totalPrice").is_none());

        let ok = SimulationResult::allowed(60.0, 30.0, "per hour", 2.0, "within limits");
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["totalPrice"], 60.0);
        assert_eq!(json["hourlyRate"], 30.0);
        assert_eq!(json["rateLabel"], "per hour");
        assert_eq!(json["duration"], 2.0);
        assert_eq!(json["errorReason"], "within limits");
    }
}
