//! The pricing resolver: best-match selection and price computation.
//!
//! Runs only after a booking has cleared every blocking gate. Candidate
//! rules are scored by match quality so that tag-specific prices beat
//! generic ones; the highest score wins and ties keep the first rule
//! found.

use tracing::warn;

use crate::request::SimulationInput;
use crate::rules::{ConditionOperator, PricingConditionType, PricingRule, RateUnit};
use crate::trace::{EvalStage, EvalTrace};

/// Score awarded for the mandatory space match.
const SCORE_SPACE: i32 = 10;
/// Bonus when the booking's weekday is listed on the rule.
const SCORE_DAY: i32 = 5;
/// Bonus when the requester holds a tag from an allow-list condition.
const SCORE_TAG_MATCH: i32 = 20;
/// Bonus when the requester is clean of a deny-list condition.
const SCORE_TAG_CLEAN: i32 = 15;

/// The resolved price for an allowed booking.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PriceQuote {
    pub(crate) total: f64,
    pub(crate) hourly: f64,
    pub(crate) label: String,
}

impl PriceQuote {
    fn free(label: impl Into<String>) -> Self {
        Self {
            total: 0.0,
            hourly: 0.0,
            label: label.into(),
        }
    }
}

fn match_score(rule: &PricingRule, input: &SimulationInput, weekday: &str) -> i32 {
    let mut score = SCORE_SPACE;

    if let Some(days) = &rule.days {
        if days.iter().any(|d| d.eq_ignore_ascii_case(weekday)) {
            score += SCORE_DAY;
        }
    }

    // Only the parent condition participates in scoring; sub-conditions
    // are descriptive.
    if rule.condition_type == Some(PricingConditionType::UserTags) {
        if let (Some(operator), Some(tags)) =
            (rule.operator, rule.value.as_ref().and_then(|v| v.as_tags()))
        {
            match operator {
                ConditionOperator::ContainsAnyOf if input.holds_any_of(tags) => {
                    score += SCORE_TAG_MATCH;
                }
                ConditionOperator::ContainsNoneOf if !input.holds_any_of(tags) => {
                    score += SCORE_TAG_CLEAN;
                }
                _ => {}
            }
        }
    }

    score
}

fn quote_from_rate(rule: &PricingRule, duration_hours: f64) -> PriceQuote {
    let amount = rule.rate.amount;
    let label = rule.rate.unit.label().to_string();
    match rule.rate.unit {
        RateUnit::Fixed => PriceQuote {
            total: amount,
            // Derived for display only.
            hourly: amount / duration_hours,
            label,
        },
        RateUnit::PerHour => PriceQuote {
            total: amount * duration_hours,
            hourly: amount,
            label,
        },
        // Any same-day booking is billed one full day.
        RateUnit::PerDay => PriceQuote {
            total: amount,
            hourly: amount / duration_hours,
            label,
        },
        other => {
            warn!(unit = other.label(), "rate unit not computed by this engine");
            PriceQuote::free(format!("Rate unit '{}' is not computed; no charge applied", other.label()))
        }
    }
}

/// Picks the best-matching pricing rule and computes the price.
pub(crate) fn resolve_price(
    rules: &[PricingRule],
    input: &SimulationInput,
    duration_hours: f64,
    trace: &mut EvalTrace,
) -> PriceQuote {
    let weekday = input.weekday_name();
    let mut best: Option<(i32, &PricingRule)> = None;

    for (index, rule) in rules.iter().enumerate() {
        if !rule.space.iter().any(|s| s == &input.space) {
            continue;
        }
        let score = match_score(rule, input, weekday);
        trace.record(EvalStage::Pricing, format!("rule {index} scored {score}"));
        // Strict comparison keeps the first rule found on ties.
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, rule));
        }
    }

    match best {
        Some((score, rule)) => {
            let quote = quote_from_rate(rule, duration_hours);
            trace.record(
                EvalStage::Pricing,
                format!("winner scored {score}: {} at {}", quote.total, quote.label),
            );
            quote
        }
        None => {
            trace.record(EvalStage::Pricing, "no pricing rule matched");
            PriceQuote::free("No pricing rule matched; the booking is free of charge")
        }
    }
}
