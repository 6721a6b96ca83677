//! The booking-window resolver.
//!
//! Advance-notice rules can legitimately differ per user segment (staff
//! may book a month out, the public three days). Rules are ranked
//! most-specific-first; the most specific applicable scope governs the
//! request, so a tag-scoped rule overrides the catch-all for tag holders
//! rather than stacking with it.

use chrono::{DateTime, Utc};

use crate::clock;
use crate::request::SimulationInput;
use crate::rules::{BookingWindowRule, UserScope, WindowConstraint};
use crate::trace::{EvalStage, EvalTrace};

use super::Rejection;

/// Outcome of the window step. Unlike the other gates, an allow carries a
/// positive justification that becomes the verdict's reason on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WindowOutcome {
    /// A governing rule was violated.
    Rejected(Rejection),
    /// No governing rule was violated.
    Allowed {
        /// Positive justification for the caller.
        message: String,
    },
}

fn scope_phrase(rule: &BookingWindowRule) -> String {
    match rule.user_scope {
        UserScope::AllUsers => "All users".to_string(),
        UserScope::UsersWithTags => format!("Users tagged {}", rule.tags.join(", ")),
        UserScope::UsersWithNoTags => "Users without tags".to_string(),
    }
}

fn applies(rule: &BookingWindowRule, input: &SimulationInput) -> bool {
    if !rule.spaces.iter().any(|s| s == &input.space) {
        return false;
    }
    match rule.user_scope {
        UserScope::AllUsers => true,
        UserScope::UsersWithTags => input.holds_any_of(&rule.tags),
        UserScope::UsersWithNoTags => input.is_anonymous(),
    }
}

/// Ranks, filters, and evaluates the advance-notice rules.
pub(crate) fn resolve_booking_window(
    rules: &[BookingWindowRule],
    input: &SimulationInput,
    now: DateTime<Utc>,
    trace: &mut EvalTrace,
) -> WindowOutcome {
    if rules.is_empty() {
        trace.record(EvalStage::BookingWindow, "no booking window rules defined");
        return WindowOutcome::Allowed {
            message: "No booking window rules are defined; any advance time is accepted."
                .to_string(),
        };
    }

    let advance_hours = clock::advance_hours(now, input.date, input.start_time);
    let advance_days = advance_hours / 24.0;
    trace.record(
        EvalStage::BookingWindow,
        format!("booking is {advance_days:.2} day(s) in advance"),
    );

    // Most-specific-first, stable within a scope.
    let mut ordered: Vec<&BookingWindowRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.user_scope.priority());

    let applicable: Vec<&BookingWindowRule> =
        ordered.into_iter().filter(|rule| applies(rule, input)).collect();

    let Some(&first) = applicable.first() else {
        trace.record(EvalStage::BookingWindow, "no rule applies to this request");
        return WindowOutcome::Allowed {
            message: "No booking window restrictions apply to this request.".to_string(),
        };
    };

    // The most specific applicable scope governs; less specific rules are
    // overridden for this requester, not stacked.
    let governing_priority = first.user_scope.priority();
    let governing = applicable
        .iter()
        .take_while(|rule| rule.user_scope.priority() == governing_priority);

    let mut satisfied: Option<&BookingWindowRule> = None;
    for rule in governing {
        let limit_hours = rule.window_hours();
        let violated = match rule.constraint {
            // Upper bound on advance: cannot book this far (or farther) out.
            WindowConstraint::LessThan => advance_hours >= limit_hours,
            // Lower bound on advance: must book at least this far out.
            WindowConstraint::MoreThan => advance_hours <= limit_hours,
        };

        if violated {
            let scope = scope_phrase(rule);
            let reason = match rule.constraint {
                WindowConstraint::LessThan => format!(
                    "{scope}: bookings may be made at most {} {} in advance; this booking is {advance_days:.1} days ahead.",
                    rule.value,
                    rule.unit.label(),
                ),
                WindowConstraint::MoreThan => format!(
                    "{scope}: bookings must be made more than {} {} in advance; this booking is only {advance_days:.1} days ahead.",
                    rule.value,
                    rule.unit.label(),
                ),
            };
            trace.record(EvalStage::BookingWindow, format!("violated: {reason}"));
            return WindowOutcome::Rejected(Rejection {
                reason,
                rule: rule.explanation.clone(),
            });
        }
        satisfied.get_or_insert(*rule);
    }

    // Nothing violated; justify the allow with the highest-priority
    // governing rule.
    let best = satisfied.unwrap_or(first);
    let clause = match best.constraint {
        WindowConstraint::LessThan => format!(
            "is inside the maximum advance of {} {}",
            best.value,
            best.unit.label()
        ),
        WindowConstraint::MoreThan => format!(
            "meets the minimum advance of {} {}",
            best.value,
            best.unit.label()
        ),
    };
    let message = format!(
        "{}: booking {advance_days:.1} days ahead {clause}.",
        scope_phrase(best)
    );
    trace.record(EvalStage::BookingWindow, format!("allowed: {message}"));
    WindowOutcome::Allowed { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WindowUnit;
    use chrono::{NaiveDate, TimeZone};

    fn rule(
        scope: UserScope,
        tags: &[&str],
        constraint: WindowConstraint,
        value: f64,
        unit: WindowUnit,
    ) -> BookingWindowRule {
        BookingWindowRule {
            user_scope: scope,
            tags: tags.iter().map(ToString::to_string).collect(),
            constraint,
            value,
            unit,
            spaces: vec!["Desk 1".to_string()],
            explanation: None,
        }
    }

    /// Evaluation clock at midnight so whole-day advances are exact.
    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    fn booking_days_ahead(days: u64, tags: &[&str]) -> SimulationInput {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(days))
            .unwrap();
        SimulationInput::new("Desk 1", date, "00:00".parse().unwrap(), "01:00".parse().unwrap())
            .with_tags(tags.iter().map(ToString::to_string).collect())
    }

    fn outcome(rules: &[BookingWindowRule], input: &SimulationInput) -> WindowOutcome {
        let mut trace = EvalTrace::new();
        resolve_booking_window(rules, input, midnight(), &mut trace)
    }

    #[test]
    fn less_than_boundary_rejects_exactly_at_the_limit() {
        let rules = vec![rule(
            UserScope::AllUsers,
            &[],
            WindowConstraint::LessThan,
            7.0,
            WindowUnit::Days,
        )];

        // Exactly 7 days ahead: advance >= limit, rejected.
        let at_limit = outcome(&rules, &booking_days_ahead(7, &[]));
        assert!(matches!(at_limit, WindowOutcome::Rejected(_)));

        // One day less: allowed.
        let under = outcome(&rules, &booking_days_ahead(6, &[]));
        assert!(matches!(under, WindowOutcome::Allowed { .. }));
    }

    #[test]
    fn more_than_boundary_rejects_exactly_at_the_limit() {
        let rules = vec![rule(
            UserScope::AllUsers,
            &[],
            WindowConstraint::MoreThan,
            2.0,
            WindowUnit::Days,
        )];

        // Exactly 2 days ahead: advance <= limit, rejected.
        let at_limit = outcome(&rules, &booking_days_ahead(2, &[]));
        assert!(matches!(at_limit, WindowOutcome::Rejected(_)));

        // One day more: allowed.
        let over = outcome(&rules, &booking_days_ahead(3, &[]));
        assert!(matches!(over, WindowOutcome::Allowed { .. }));
    }

    #[test]
    fn tag_scoped_rule_overrides_the_general_rule_for_tag_holders() {
        let rules = vec![
            rule(UserScope::AllUsers, &[], WindowConstraint::LessThan, 3.0, WindowUnit::Days),
            rule(
                UserScope::UsersWithTags,
                &["Staff"],
                WindowConstraint::LessThan,
                30.0,
                WindowUnit::Days,
            ),
        ];

        // 5 days out would violate the general 3-day rule, but the
        // tag-scoped 30-day window governs tag holders instead.
        let tagged = outcome(&rules, &booking_days_ahead(5, &["Staff"]));
        match tagged {
            WindowOutcome::Allowed { message } => {
                assert!(message.contains("Users tagged Staff"), "{message}");
                assert!(message.contains("30 days"), "{message}");
            }
            WindowOutcome::Rejected(r) => panic!("unexpected rejection: {}", r.reason),
        }

        // At 31 days out the tag rule itself rejects, with its own message.
        let far = outcome(&rules, &booking_days_ahead(31, &["Staff"]));
        match far {
            WindowOutcome::Rejected(rejection) => {
                assert!(rejection.reason.contains("Users tagged Staff"), "{}", rejection.reason);
            }
            WindowOutcome::Allowed { .. } => panic!("31 days exceeds the tag window"),
        }

        // Untagged requesters stay under the general 3-day rule.
        let untagged = outcome(&rules, &booking_days_ahead(5, &[]));
        match untagged {
            WindowOutcome::Rejected(rejection) => {
                assert!(rejection.reason.contains("All users"), "{}", rejection.reason);
                assert!(rejection.reason.contains("3 days"), "{}", rejection.reason);
            }
            WindowOutcome::Allowed { .. } => panic!("general rule should veto"),
        }
    }

    #[test]
    fn same_scope_rules_can_bound_both_directions() {
        let rules = vec![
            rule(UserScope::AllUsers, &[], WindowConstraint::LessThan, 30.0, WindowUnit::Days),
            rule(UserScope::AllUsers, &[], WindowConstraint::MoreThan, 2.0, WindowUnit::Days),
        ];

        let too_soon = outcome(&rules, &booking_days_ahead(1, &[]));
        assert!(matches!(too_soon, WindowOutcome::Rejected(_)));

        let fine = outcome(&rules, &booking_days_ahead(10, &[]));
        assert!(matches!(fine, WindowOutcome::Allowed { .. }));
    }

    #[test]
    fn untagged_scope_applies_only_to_anonymous_requesters() {
        let rules = vec![rule(
            UserScope::UsersWithNoTags,
            &[],
            WindowConstraint::LessThan,
            1.0,
            WindowUnit::Days,
        )];

        let anonymous = outcome(&rules, &booking_days_ahead(2, &[]));
        assert!(matches!(anonymous, WindowOutcome::Rejected(_)));

        // Tagged requesters fall outside the rule's scope entirely.
        let tagged = outcome(&rules, &booking_days_ahead(2, &["Staff"]));
        match tagged {
            WindowOutcome::Allowed { message } => {
                assert!(message.contains("No booking window restrictions apply"));
            }
            WindowOutcome::Rejected(r) => panic!("unexpected rejection: {}", r.reason),
        }
    }

    #[test]
    fn empty_rule_list_and_inapplicable_rules_use_distinct_messages() {
        let none: Vec<BookingWindowRule> = Vec::new();
        let WindowOutcome::Allowed { message: empty_msg } =
            outcome(&none, &booking_days_ahead(1, &[]))
        else {
            panic!("empty rule list must allow");
        };

        let other_space = vec![BookingWindowRule {
            spaces: vec!["Desk 2".to_string()],
            ..rule(UserScope::AllUsers, &[], WindowConstraint::LessThan, 1.0, WindowUnit::Days)
        }];
        let WindowOutcome::Allowed { message: inapplicable_msg } =
            outcome(&other_space, &booking_days_ahead(1, &[]))
        else {
            panic!("inapplicable rules must allow");
        };

        assert_ne!(empty_msg, inapplicable_msg);
    }

    #[test]
    fn units_normalize_to_hours() {
        let rules = vec![rule(
            UserScope::AllUsers,
            &[],
            WindowConstraint::LessThan,
            1.0,
            WindowUnit::Weeks,
        )];

        // 168 hours = exactly one week: at the limit, rejected.
        let at_limit = outcome(&rules, &booking_days_ahead(7, &[]));
        assert!(matches!(at_limit, WindowOutcome::Rejected(_)));

        let under = outcome(&rules, &booking_days_ahead(6, &[]));
        assert!(matches!(under, WindowOutcome::Allowed { .. }));
    }
}
