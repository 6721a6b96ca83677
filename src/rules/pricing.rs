//! Pricing rules.

use serde::{Deserialize, Serialize};

use super::{ConditionOperator, ConditionValue, LogicOperator, TimeWindow};

/// How a rate amount scales with the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateUnit {
    /// One flat amount regardless of duration.
    #[serde(rename = "fixed")]
    Fixed,
    /// Amount per started quarter hour. Modeled, not yet computed.
    #[serde(rename = "per_15min")]
    Per15Min,
    /// Amount per started half hour. Modeled, not yet computed.
    #[serde(rename = "per_30min")]
    Per30Min,
    /// Amount per hour.
    #[serde(rename = "per_hour")]
    PerHour,
    /// Amount per two-hour block. Modeled, not yet computed.
    #[serde(rename = "per_2hours")]
    Per2Hours,
    /// Flat day rate: any same-day booking is billed one full day.
    #[serde(rename = "per_day")]
    PerDay,
}

impl RateUnit {
    /// Human label used when surfacing the rate to the caller.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Per15Min => "per 15 minutes",
            Self::Per30Min => "per 30 minutes",
            Self::PerHour => "per hour",
            Self::Per2Hours => "per 2 hours",
            Self::PerDay => "per day",
        }
    }
}

/// A price amount with its scaling unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// The monetary amount, in the venue's currency.
    pub amount: f64,
    /// How the amount scales with the booking.
    pub unit: RateUnit,
}

/// The quantity a pricing condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingConditionType {
    /// Booking duration.
    Duration,
    /// The requester's tags.
    UserTags,
    /// Condition type not recognized by this engine version.
    #[serde(other)]
    Unknown,
}

/// A nested pricing condition.
///
/// Sub-conditions are descriptive only: the engine surfaces them to the
/// presentation layer but scores matches on the parent condition alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCondition {
    /// Quantity inspected.
    pub condition_type: PricingConditionType,
    /// Comparison operator.
    pub operator: ConditionOperator,
    /// Comparison value (duration string or tag list).
    pub value: ConditionValue,
    /// How this condition chains with its predecessor.
    #[serde(default)]
    pub logic: Option<LogicOperator>,
}

/// A candidate price for bookings matching this rule's space, day, and
/// requester profile. Among eligible rules the best match wins; see the
/// pricing resolver for the scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Spaces this price applies to.
    #[serde(default, alias = "spaces")]
    pub space: Vec<String>,
    /// Wall-clock window the price covers, if constrained.
    #[serde(default)]
    pub time_range: Option<TimeWindow>,
    /// Weekdays the price covers; absent means every day.
    #[serde(default)]
    pub days: Option<Vec<String>>,
    /// The rate to charge.
    pub rate: Rate,
    /// Quantity the parent condition inspects, if any.
    #[serde(default)]
    pub condition_type: Option<PricingConditionType>,
    /// Parent condition operator.
    #[serde(default)]
    pub operator: Option<ConditionOperator>,
    /// Parent condition value.
    #[serde(default)]
    pub value: Option<ConditionValue>,
    /// Nested conditions, descriptive only.
    #[serde(default)]
    pub sub_conditions: Vec<PricingCondition>,
    /// Author's rationale.
    #[serde(default)]
    pub explanation: Option<String>,
}
