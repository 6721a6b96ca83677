//! Booking conditions: the rule family that can forbid a booking
//! outright, independent of price.

use serde::{Deserialize, Serialize};

use super::{ConditionOperator, ConditionValue, LogicOperator, TimeWindow};

/// The quantity a condition rule constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// The booking's elapsed duration.
    Duration,
    /// Alignment of the start time within the day.
    IntervalStart,
    /// Alignment of the end time within the day.
    IntervalEnd,
    /// The requester's tags.
    UserTags,
    /// Kind not recognized by this engine version.
    #[serde(other)]
    Unknown,
}

/// One constraint inside a condition block. The booking must satisfy the
/// operator; failing it is a violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    /// Quantity constrained.
    pub condition_type: ConditionKind,
    /// The requirement the quantity must satisfy.
    pub operator: ConditionOperator,
    /// Comparison value (duration string, interval, or tag list).
    pub value: ConditionValue,
    /// Author's rationale for this constraint.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A block of constraints scoped to spaces and weekdays.
///
/// Two authored shapes exist: a legacy single constraint written directly
/// on the block (`condition_type`/`operator`/`value`) and the modern
/// `rules` list chained by `logic_operators`. [`BookingCondition::effective_rules`]
/// normalizes both into one list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingCondition {
    /// Spaces this block governs.
    #[serde(default, alias = "spaces")]
    pub space: Vec<String>,
    /// Weekdays this block governs; absent means every day.
    #[serde(default)]
    pub days: Option<Vec<String>>,
    /// Wall-clock window this block governs, if constrained.
    #[serde(default)]
    pub time_range: Option<TimeWindow>,
    /// Legacy single-constraint shape: quantity constrained.
    #[serde(default)]
    pub condition_type: Option<ConditionKind>,
    /// Legacy single-constraint shape: requirement operator.
    #[serde(default)]
    pub operator: Option<ConditionOperator>,
    /// Legacy single-constraint shape: comparison value.
    #[serde(default)]
    pub value: Option<ConditionValue>,
    /// Modern shape: the block's constraints.
    #[serde(default)]
    pub rules: Vec<ConditionRule>,
    /// How consecutive `rules` entries chain. OR is the only combinator
    /// with observed semantics; any violated rule forbids the booking.
    #[serde(default)]
    pub logic_operators: Vec<LogicOperator>,
    /// Author's rationale, attributed to the caller on rejection.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl BookingCondition {
    /// The block's constraints with the legacy shape folded in.
    ///
    /// A legacy constraint is prepended when all three of its fields are
    /// present; partially-authored legacy fields are ignored.
    #[must_use]
    pub fn effective_rules(&self) -> Vec<ConditionRule> {
        let mut rules = Vec::with_capacity(self.rules.len() + 1);
        if let (Some(condition_type), Some(operator), Some(value)) =
            (self.condition_type, self.operator, self.value.clone())
        {
            rules.push(ConditionRule {
                condition_type,
                operator,
                value,
                explanation: self.explanation.clone(),
            });
        }
        rules.extend(self.rules.iter().cloned());
        rules
    }

    /// True when this block governs the given space on the given weekday.
    #[must_use]
    pub fn applies_to(&self, space: &str, weekday: &str) -> bool {
        if !self.space.iter().any(|s| s == space) {
            return false;
        }
        match &self.days {
            Some(days) if !days.is_empty() => days.iter().any(|d| d.eq_ignore_ascii_case(weekday)),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_shape_decodes() {
        let raw = r#"{
            "space": ["Meeting Room"],
            "days": ["Monday", "Tuesday"],
            "rules": [
                {"condition_type": "duration", "operator": "is_less_than", "value": "2h"},
                {"condition_type": "duration", "operator": "is_greater_than", "value": "4h"}
            ],
            "logic_operators": ["or"],
            "explanation": "Bookings run 2-4 hours"
        }"#;
        let block: BookingCondition = serde_json::from_str(raw).unwrap();
        assert_eq!(block.effective_rules().len(), 2);
        assert!(block.applies_to("Meeting Room", "Monday"));
        assert!(!block.applies_to("Meeting Room", "Wednesday"));
        assert!(!block.applies_to("Other Room", "Monday"));
    }

    #[test]
    fn legacy_shape_folds_into_effective_rules() {
        let raw = r#"{
            "space": ["Desk 1"],
            "condition_type": "user_tags",
            "operator": "contains_any_of",
            "value": ["Staff"],
            "explanation": "Staff only"
        }"#;
        let block: BookingCondition = serde_json::from_str(raw).unwrap();
        let rules = block.effective_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].condition_type, ConditionKind::UserTags);
        assert_eq!(rules[0].explanation.as_deref(), Some("Staff only"));
    }

    #[test]
    fn partial_legacy_fields_are_ignored() {
        let raw = r#"{
            "space": ["Desk 1"],
            "condition_type": "duration"
        }"#;
        let block: BookingCondition = serde_json::from_str(raw).unwrap();
        assert!(block.effective_rules().is_empty());
    }

    #[test]
    fn absent_days_means_every_day() {
        let block = BookingCondition {
            space: vec!["Desk 1".to_string()],
            ..BookingCondition::default()
        };
        assert!(block.applies_to("Desk 1", "Sunday"));
    }

    #[test]
    fn unknown_condition_kind_still_decodes() {
        let kind: ConditionKind = serde_json::from_str("\"moon_phase\"").unwrap();
        assert_eq!(kind, ConditionKind::Unknown);
    }
}
