//! The quota resolver.
//!
//! Without historical booking data this is a per-booking check: a time
//! quota caps the duration of the request itself rather than a rolling
//! usage total. Count quotas are carried in the model but not evaluated.

use tracing::warn;

use crate::duration::DurationValue;
use crate::request::SimulationInput;
use crate::rules::{QuotaRule, QuotaTarget, QuotaType};
use crate::trace::{EvalStage, EvalTrace};

use super::Rejection;

fn applies(rule: &QuotaRule, input: &SimulationInput) -> bool {
    let target_matches = match rule.target {
        QuotaTarget::Individuals => true,
        QuotaTarget::IndividualsWithTags | QuotaTarget::GroupWithTag => {
            input.holds_any_of(&rule.tags)
        }
        QuotaTarget::IndividualsWithNoTags => input.is_anonymous(),
        QuotaTarget::Unknown => {
            warn!("unrecognized quota target; skipping rule");
            false
        }
    };
    target_matches && rule.affected_spaces.iter().any(|s| s == &input.space)
}

/// Checks every quota ceiling against the requested duration.
pub(crate) fn check_quotas(
    rules: &[QuotaRule],
    input: &SimulationInput,
    duration_hours: f64,
    trace: &mut EvalTrace,
) -> Option<Rejection> {
    for rule in rules {
        if !applies(rule, input) {
            continue;
        }

        match rule.quota_type {
            QuotaType::Time => {
                let Some(limit_hours) = rule.value.as_hours() else {
                    warn!(value = ?rule.value, "time quota with unparseable value; skipping");
                    continue;
                };
                if duration_hours > limit_hours {
                    let reason = format!(
                        "Requested duration of {} exceeds the quota of {} {}.",
                        DurationValue::from_hours(duration_hours),
                        DurationValue::from_hours(limit_hours),
                        rule.period.label(),
                    );
                    trace.record(EvalStage::Quota, format!("violated: {reason}"));
                    return Some(Rejection {
                        reason,
                        rule: rule.explanation.clone(),
                    });
                }
                trace.record(
                    EvalStage::Quota,
                    format!("within the {} quota of {limit_hours} hour(s)", rule.period.label()),
                );
            }
            QuotaType::Count => {
                // Counting needs booking history the engine does not have.
                trace.record(EvalStage::Quota, "count quota present but not evaluated");
            }
        }
    }
    None
}
