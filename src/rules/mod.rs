//! The rule model: plain records for the six rule families.
//!
//! Rules are authored elsewhere (an administrator edits the output of a
//! natural-language conversion service) and handed to the engine as one
//! immutable aggregate, the [`RuleSet`]. Every family may be absent or
//! empty; rules are exclusively restrictive, so an empty family never
//! blocks anything.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::duration::DurationValue;

mod condition;
mod pricing;
mod quota;
mod window;

pub use condition::{BookingCondition, ConditionKind, ConditionRule};
pub use pricing::{PricingCondition, PricingConditionType, PricingRule, Rate, RateUnit};
pub use quota::{ConsiderationTime, QuotaPeriod, QuotaRule, QuotaTarget, QuotaType, QuotaValue};
pub use window::{BookingWindowRule, UserScope, WindowConstraint, WindowUnit};

/// A start/end wall-clock pair attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: ClockTime,
    /// End of the window.
    pub end: ClockTime,
}

/// Comparison operators used by rule conditions.
///
/// Unknown operators deserialize to [`ConditionOperator::Unknown`] so a
/// rule set with an unrecognized operator still loads; evaluators treat
/// such rules as non-violating and log the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// The quantity must exceed the value.
    IsGreaterThan,
    /// The quantity must be at least the value.
    IsGreaterThanOrEqualTo,
    /// The quantity must be below the value.
    IsLessThan,
    /// The quantity must be at most the value.
    IsLessThanOrEqualTo,
    /// The quantity must be an even multiple of the value.
    MultipleOf,
    /// The requester must hold at least one of the listed tags.
    ContainsAnyOf,
    /// The requester must hold none of the listed tags.
    ContainsNoneOf,
    /// Operator not recognized by this engine version.
    #[serde(other)]
    Unknown,
}

/// How consecutive condition rules in one block are chained.
///
/// OR is the only combinator with observed semantics: any violated rule
/// in a block forbids the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicOperator {
    /// Both sides must hold.
    And,
    /// Either side suffices.
    Or,
}

/// The value a condition compares against: a number, a duration string,
/// or a tag list. Kept raw so one malformed value degrades gracefully at
/// evaluation time instead of failing the whole rule-set decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// A bare number, interpreted as hours where a duration is expected.
    Number(f64),
    /// A string, usually a duration like `"2h"` or `"1h30min"`.
    Text(String),
    /// A list of user tags.
    Tags(Vec<String>),
}

impl ConditionValue {
    /// Interprets the value as a duration, if it is one.
    #[must_use]
    pub fn as_duration(&self) -> Option<DurationValue> {
        match self {
            Self::Number(hours) => Some(DurationValue::from_hours(*hours)),
            Self::Text(raw) => raw.parse().ok(),
            Self::Tags(_) => None,
        }
    }

    /// Interprets the value as a tag list, if it is one.
    #[must_use]
    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            Self::Tags(tags) => Some(tags),
            _ => None,
        }
    }
}

/// Minimum idle time required around bookings in the listed spaces.
///
/// Modeled but not enforced: conflict detection needs the neighboring
/// bookings for the slot, which this engine does not have. A real
/// enforcement pass must be handed an "existing bookings near this slot"
/// query by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferTimeRule {
    /// Spaces the buffer applies to.
    #[serde(default)]
    pub spaces: Vec<String>,
    /// Required idle time between bookings.
    pub buffer_duration: DurationValue,
    /// Author's rationale, surfaced to the caller on rejection.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A symmetric mutual-exclusion edge between two spaces.
///
/// Evaluated by the editing UI, not by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSharingRule {
    /// One side of the edge.
    pub from: String,
    /// The other side.
    pub to: String,
}

/// The aggregate handed to one evaluation: every rule family, ordered as
/// authored. Missing families default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Pricing rules, scored by match quality.
    #[serde(alias = "pricing")]
    pub pricing_rules: Vec<PricingRule>,
    /// Conditions that can forbid a booking outright.
    #[serde(alias = "conditions")]
    pub booking_conditions: Vec<BookingCondition>,
    /// Usage ceilings per user segment.
    #[serde(alias = "quotas")]
    pub quota_rules: Vec<QuotaRule>,
    /// Idle-time requirements around bookings.
    #[serde(alias = "buffer_times")]
    pub buffer_time_rules: Vec<BufferTimeRule>,
    /// Advance-notice constraints.
    #[serde(alias = "booking_windows")]
    pub booking_window_rules: Vec<BookingWindowRule>,
    /// Mutual-exclusion links between spaces.
    #[serde(alias = "space_sharing")]
    pub space_sharing_rules: Vec<SpaceSharingRule>,
}

impl RuleSet {
    /// Returns true if no family contains any rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pricing_rules.is_empty()
            && self.booking_conditions.is_empty()
            && self.quota_rules.is_empty()
            && self.buffer_time_rules.is_empty()
            && self.booking_window_rules.is_empty()
            && self.space_sharing_rules.is_empty()
    }
}

/// The envelope produced by the text-to-structured-data collaborator.
///
/// The engine consumes only [`ParsedRuleBlocks::parsed_rule_blocks`]; the
/// setup guide and summary ride along for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRuleBlocks {
    /// The six rule-family arrays.
    pub parsed_rule_blocks: RuleSet,
    /// Step-by-step setup notes for the administrator.
    #[serde(default)]
    pub setup_guide: Vec<serde_json::Value>,
    /// Free-text summary of the parsed policy.
    #[serde(default)]
    pub summary: String,
}

impl ParsedRuleBlocks {
    /// Decodes the collaborator envelope from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::Parse`](crate::error::RuleSetError) when the
    /// payload does not fit the envelope shape.
    pub fn from_json(raw: &str) -> Result<Self, crate::error::RuleSetError> {
        serde_json::from_str(raw).map_err(|e| crate::error::RuleSetError::Parse {
            message: e.to_string(),
        })
    }

    /// Consumes the envelope, keeping only the rule set.
    #[must_use]
    pub fn into_rule_set(self) -> RuleSet {
        self.parsed_rule_blocks
    }
}
