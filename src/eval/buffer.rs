//! The buffer-time resolver: a deliberate no-op.
//!
//! Buffer enforcement needs the bookings adjacent to the requested slot,
//! and this engine evaluates a single hypothetical request with no
//! calendar access. The collaborator contract for a real implementation
//! is an "existing bookings near this slot" query supplied by the caller;
//! until one exists, buffer rules are surfaced in the trace and allowed.

use crate::rules::BufferTimeRule;
use crate::trace::{EvalStage, EvalTrace};

use super::Rejection;

/// Always allows; records the unenforced rules in the trace.
pub(crate) fn check_buffers(
    rules: &[BufferTimeRule],
    trace: &mut EvalTrace,
) -> Option<Rejection> {
    if rules.is_empty() {
        return None;
    }
    trace.record(
        EvalStage::Buffer,
        format!(
            "{} buffer rule(s) present; conflict detection needs neighboring bookings and is not performed",
            rules.len()
        ),
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_rules_never_reject() {
        let rules = vec![BufferTimeRule {
            spaces: vec!["Studio A".to_string()],
            buffer_duration: "30min".parse().unwrap(),
            explanation: None,
        }];
        let mut trace = EvalTrace::new();
        assert!(check_buffers(&rules, &mut trace).is_none());
        assert!(!trace.is_empty());
    }

    #[test]
    fn empty_buffer_list_stays_silent() {
        let mut trace = EvalTrace::new();
        assert!(check_buffers(&[], &mut trace).is_none());
        assert!(trace.is_empty());
    }
}
