//! The evaluation engine: a fixed, short-circuiting pipeline over one
//! rule set and one request.
//!
//! Pipeline order: duration validation, booking conditions, booking
//! window, quotas, buffer stub, and finally pricing for bookings that
//! cleared every gate. Each rule family vetoes independently; the first
//! disqualifying match wins.
//!
//! Evaluation is a pure computation: it reads its inputs, allocates local
//! state, and returns one [`SimulationResult`]. The evaluation clock is
//! injected, never sampled from a global source, so results are
//! deterministic and callers may evaluate concurrently without
//! coordination.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::clock;
use crate::request::{SimulationInput, SimulationResult};
use crate::rules::RuleSet;
use crate::trace::{EvalStage, EvalTrace};

mod buffer;
mod conditions;
mod pricing;
mod quota;
mod window;

/// A rule-family veto: why, and which authored rule to attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub(crate) reason: String,
    pub(crate) rule: Option<String>,
}

impl Rejection {
    fn into_result(self) -> SimulationResult {
        SimulationResult::rejected(self.reason, self.rule)
    }
}

/// Evaluates one hypothetical booking against a rule set.
///
/// `now` is the evaluation clock used for advance-window distances.
/// Rejections come back as results, never as errors.
///
/// # Examples
///
/// ```
/// use bookable::{evaluate, RuleSet, SimulationInput};
/// use chrono::{NaiveDate, Utc};
///
/// let input = SimulationInput::new(
///     "Desk 1",
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     "09:00".parse().unwrap(),
///     "11:00".parse().unwrap(),
/// );
///
/// // An empty rule set restricts nothing.
/// let result = evaluate(&RuleSet::default(), &input, Utc::now());
/// assert!(result.allowed);
/// ```
#[must_use]
pub fn evaluate(
    rule_set: &RuleSet,
    input: &SimulationInput,
    now: DateTime<Utc>,
) -> SimulationResult {
    let mut trace = EvalTrace::new();
    evaluate_traced(rule_set, input, now, &mut trace)
}

/// Like [`evaluate`], recording every decision step into `trace`.
pub fn evaluate_traced(
    rule_set: &RuleSet,
    input: &SimulationInput,
    now: DateTime<Utc>,
    trace: &mut EvalTrace,
) -> SimulationResult {
    debug!(
        request_id = %trace.request_id,
        space = %input.space,
        date = %input.date,
        "evaluating booking request"
    );

    let duration = match clock::duration_hours(input.start_time, input.end_time) {
        Ok(hours) => hours,
        Err(err) => {
            trace.record(EvalStage::Validation, err.to_string());
            return SimulationResult::rejected(err.to_string(), None);
        }
    };
    trace.record(
        EvalStage::Validation,
        format!("requested duration is {duration} hour(s)"),
    );

    if let Some(rejection) =
        conditions::check_conditions(&rule_set.booking_conditions, input, duration, trace)
    {
        return rejection.into_result();
    }

    let window_justification =
        match window::resolve_booking_window(&rule_set.booking_window_rules, input, now, trace) {
            window::WindowOutcome::Rejected(rejection) => return rejection.into_result(),
            window::WindowOutcome::Allowed { message } => message,
        };

    if let Some(rejection) = quota::check_quotas(&rule_set.quota_rules, input, duration, trace) {
        return rejection.into_result();
    }

    if let Some(rejection) = buffer::check_buffers(&rule_set.buffer_time_rules, trace) {
        return rejection.into_result();
    }

    let quote = pricing::resolve_price(&rule_set.pricing_rules, input, duration, trace);
    trace.record(
        EvalStage::Verdict,
        format!("allowed at {} ({})", quote.total, quote.label),
    );

    SimulationResult::allowed(
        quote.total,
        quote.hourly,
        quote.label,
        duration,
        window_justification,
    )
}
