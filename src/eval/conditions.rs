//! The booking-condition access gate.
//!
//! Condition blocks are evaluated in rule-set order; the first block with
//! any violated constraint forbids the booking, and every violation in
//! that block is folded into one combined message.

use tracing::warn;

use crate::duration::DurationValue;
use crate::request::SimulationInput;
use crate::rules::{BookingCondition, ConditionKind, ConditionOperator, ConditionRule};
use crate::trace::{EvalStage, EvalTrace};

use super::Rejection;

/// Repairs operator direction in blocks carrying a min/max duration pair.
///
/// Authors (human or generative) frequently write "minimum 2h, maximum
/// 4h" as `is_less_than 2h` / `is_greater_than 4h`, meaning "violates if
/// under 2h / over 4h" - inverted from the literal requirement reading.
/// When a block holds two or more duration constraints, the smallest is
/// coerced to a minimum (`is_greater_than_or_equal_to`) if written as
/// `is_less_than`, and the largest to a maximum
/// (`is_less_than_or_equal_to`) if written as `is_greater_than`.
///
/// A correctly authored pair passes through untouched, so the pass is
/// idempotent. Blocks with fewer than two duration constraints are never
/// modified. This is a heuristic repair of ambiguous authoring, kept for
/// behavioral compatibility; see DESIGN.md.
pub(crate) fn correct_duration_operators(mut rules: Vec<ConditionRule>) -> Vec<ConditionRule> {
    let mut durations: Vec<(usize, DurationValue)> = rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            if rule.condition_type != ConditionKind::Duration {
                return None;
            }
            rule.value.as_duration().map(|d| (index, d))
        })
        .collect();

    if durations.len() < 2 {
        return rules;
    }

    durations.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    let (min_index, _) = durations[0];
    let (max_index, _) = durations[durations.len() - 1];

    if rules[min_index].operator == ConditionOperator::IsLessThan {
        rules[min_index].operator = ConditionOperator::IsGreaterThanOrEqualTo;
    }
    if rules[max_index].operator == ConditionOperator::IsGreaterThan {
        rules[max_index].operator = ConditionOperator::IsLessThanOrEqualTo;
    }
    rules
}

fn duration_violation(rule: &ConditionRule, duration_hours: f64) -> Option<String> {
    let Some(required) = rule.value.as_duration() else {
        warn!(value = ?rule.value, "duration condition with unparseable value; skipping");
        return None;
    };
    let limit = required.as_hours();
    let requested = DurationValue::from_hours(duration_hours);

    let (satisfied, requirement) = match rule.operator {
        ConditionOperator::IsGreaterThan => (duration_hours > limit, "more than"),
        ConditionOperator::IsGreaterThanOrEqualTo => (duration_hours >= limit, "at least"),
        ConditionOperator::IsLessThan => (duration_hours < limit, "less than"),
        ConditionOperator::IsLessThanOrEqualTo => (duration_hours <= limit, "at most"),
        ConditionOperator::MultipleOf => {
            // Tolerance of 0.01h absorbs float noise in the modulo.
            let remainder = duration_hours % limit;
            let aligned = remainder < 0.01 || (limit - remainder) < 0.01;
            if aligned {
                return None;
            }
            return Some(format!(
                "Booking duration must be a multiple of {required}; requested {requested}."
            ));
        }
        other => {
            warn!(operator = ?other, "unrecognized duration operator; skipping");
            return None;
        }
    };

    if satisfied {
        None
    } else {
        Some(format!(
            "Booking duration must be {requirement} {required}; requested {requested}."
        ))
    }
}

fn interval_violation(rule: &ConditionRule, input: &SimulationInput) -> Option<String> {
    if rule.operator != ConditionOperator::MultipleOf {
        warn!(operator = ?rule.operator, "interval condition supports only multiple_of; skipping");
        return None;
    }
    let interval = rule
        .value
        .as_duration()
        .and_then(|d| d.whole_minutes())
        .filter(|minutes| *minutes > 0);
    let Some(interval) = interval else {
        warn!(value = ?rule.value, "interval condition with unusable value; skipping");
        return None;
    };

    let (which, time) = match rule.condition_type {
        ConditionKind::IntervalStart => ("start", input.start_time),
        _ => ("end", input.end_time),
    };
    if u32::from(time.minutes_from_midnight()) % interval == 0 {
        return None;
    }

    if interval == 60 {
        Some("Bookings must start and end on the hour.".to_string())
    } else {
        Some(format!(
            "Booking {which} time must align to {interval}-minute intervals; got {time}."
        ))
    }
}

fn tag_violation(rule: &ConditionRule, input: &SimulationInput) -> Option<String> {
    let Some(tags) = rule.value.as_tags() else {
        warn!(value = ?rule.value, "user_tags condition without a tag list; skipping");
        return None;
    };

    match rule.operator {
        // Allow-list: only holders may book.
        ConditionOperator::ContainsAnyOf => {
            if input.holds_any_of(tags) {
                None
            } else {
                Some(format!(
                    "This booking requires one of the following tags: {}.",
                    tags.join(", ")
                ))
            }
        }
        // Deny-list: holders may not book.
        ConditionOperator::ContainsNoneOf => {
            if input.holds_any_of(tags) {
                Some(format!(
                    "This booking is not available to users tagged {}.",
                    tags.join(", ")
                ))
            } else {
                None
            }
        }
        other => {
            warn!(operator = ?other, "unrecognized tag operator; skipping");
            None
        }
    }
}

/// Runs every applicable condition block, stopping at the first block
/// with a violation.
pub(crate) fn check_conditions(
    conditions: &[BookingCondition],
    input: &SimulationInput,
    duration_hours: f64,
    trace: &mut EvalTrace,
) -> Option<Rejection> {
    let weekday = input.weekday_name();

    for (index, block) in conditions.iter().enumerate() {
        if !block.applies_to(&input.space, weekday) {
            continue;
        }

        let rules = correct_duration_operators(block.effective_rules());
        let mut violations: Vec<String> = Vec::new();
        for rule in &rules {
            let violation = match rule.condition_type {
                ConditionKind::Duration => duration_violation(rule, duration_hours),
                ConditionKind::IntervalStart | ConditionKind::IntervalEnd => {
                    interval_violation(rule, input)
                }
                ConditionKind::UserTags => tag_violation(rule, input),
                ConditionKind::Unknown => {
                    warn!("unrecognized condition type; skipping");
                    trace.record(
                        EvalStage::Conditions,
                        format!("block {index}: skipped a rule with unrecognized condition type"),
                    );
                    None
                }
            };
            if let Some(message) = violation {
                violations.push(message);
            }
        }

        if violations.is_empty() {
            trace.record(EvalStage::Conditions, format!("block {index} satisfied"));
            continue;
        }

        trace.record(
            EvalStage::Conditions,
            format!("block {index} violated ({} constraint(s))", violations.len()),
        );
        return Some(Rejection {
            reason: violations.join(" "),
            rule: block.explanation.clone(),
        });
    }

    trace.record(EvalStage::Conditions, "all condition blocks satisfied");
    None
}
