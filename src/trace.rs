//! The evaluation trace: an injectable side-channel for decision
//! diagnostics.
//!
//! The evaluators themselves are pure; everything they would have logged
//! is recorded here instead, so a decision can be replayed and inspected
//! without capturing log output.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Pipeline stage a trace event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalStage {
    /// Request validation (duration check).
    Validation,
    /// Booking-condition access gate.
    Conditions,
    /// Advance-notice window resolution.
    BookingWindow,
    /// Quota ceilings.
    Quota,
    /// Buffer-time stub.
    Buffer,
    /// Price resolution.
    Pricing,
    /// Final verdict assembly.
    Verdict,
}

impl fmt::Display for EvalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Conditions => "conditions",
            Self::BookingWindow => "booking_window",
            Self::Quota => "quota",
            Self::Buffer => "buffer",
            Self::Pricing => "pricing",
            Self::Verdict => "verdict",
        };
        f.write_str(name)
    }
}

/// One recorded step of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    /// The pipeline stage that produced the event.
    pub stage: EvalStage,
    /// What happened.
    pub message: String,
}

/// Ordered record of one evaluation's decision steps.
#[derive(Debug, Clone, Serialize)]
pub struct EvalTrace {
    /// Identifier tying the trace to one evaluation call.
    pub request_id: Uuid,
    events: Vec<TraceEvent>,
}

impl EvalTrace {
    /// Creates an empty trace with a fresh request id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            events: Vec::new(),
        }
    }

    /// Records one event.
    pub fn record(&mut self, stage: EvalStage, message: impl Into<String>) {
        self.events.push(TraceEvent {
            stage,
            message: message.into(),
        });
    }

    /// The recorded events, in order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EvalTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvalTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evaluation {}", self.request_id)?;
        for event in &self.events {
            writeln!(f, "  [{}] {}", event.stage, event.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_in_order() {
        let mut trace = EvalTrace::new();
        trace.record(EvalStage::Validation, "duration 2h");
        trace.record(EvalStage::Pricing, "matched per-hour rule");

        assert_eq!(trace.events().len(), 2);
        assert_eq!(trace.events()[0].stage, EvalStage::Validation);
        assert_eq!(trace.events()[1].message, "matched per-hour rule");
    }

    #[test]
    fn display_lists_stage_and_message() {
        let mut trace = EvalTrace::new();
        trace.record(EvalStage::Quota, "no quota applies");
        let rendered = format!("{trace}");
        assert!(rendered.contains("[quota] no quota applies"));
        assert!(rendered.contains(&trace.request_id.to_string()));
    }

    #[test]
    fn fresh_traces_have_distinct_ids() {
        assert_ne!(EvalTrace::new().request_id, EvalTrace::new().request_id);
    }
}
