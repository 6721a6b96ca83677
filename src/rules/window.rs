//! Booking-window rules: how far in advance a booking may be made.

use serde::{Deserialize, Serialize};

/// Which requester population a booking-window rule governs.
///
/// Scopes have a specificity order used when several rules apply to one
/// request: tag-scoped rules outrank tagless-scoped rules, which outrank
/// the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserScope {
    /// Every requester.
    AllUsers,
    /// Requesters holding at least one of the rule's tags.
    UsersWithTags,
    /// Anonymous or untagged requesters.
    UsersWithNoTags,
}

impl UserScope {
    /// Specificity rank; lower sorts first.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::UsersWithTags => 0,
            Self::UsersWithNoTags => 1,
            Self::AllUsers => 2,
        }
    }

    /// Human description used in synthesized messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::AllUsers => "All users",
            Self::UsersWithTags => "Users with the required tags",
            Self::UsersWithNoTags => "Users without tags",
        }
    }
}

/// Direction of the advance-notice constraint.
///
/// Note the semantics are the inverse of a naive reading: the value is a
/// bound on the *advance*, not on the booking itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowConstraint {
    /// The advance window is an upper bound: bookings may not be made
    /// this far (or farther) ahead.
    LessThan,
    /// The advance window is a lower bound: bookings must be made at
    /// least this far ahead.
    MoreThan,
}

/// The unit the rule's `value` is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowUnit {
    /// Hours.
    Hours,
    /// Days (24 hours).
    Days,
    /// Weeks (168 hours).
    Weeks,
}

impl WindowUnit {
    /// Converts a value in this unit to hours.
    #[must_use]
    pub fn to_hours(&self, value: f64) -> f64 {
        match self {
            Self::Hours => value,
            Self::Days => value * 24.0,
            Self::Weeks => value * 168.0,
        }
    }

    /// Human label used in synthesized messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
        }
    }
}

/// An advance-notice constraint for a requester segment and space set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWindowRule {
    /// Which requester population the constraint governs.
    pub user_scope: UserScope,
    /// Tags selecting the population, when tag-scoped.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Direction of the constraint.
    pub constraint: WindowConstraint,
    /// Magnitude of the window, in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: WindowUnit,
    /// Spaces the constraint covers.
    #[serde(default)]
    pub spaces: Vec<String>,
    /// Author's rationale.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl BookingWindowRule {
    /// The rule's window expressed in hours.
    #[must_use]
    pub fn window_hours(&self) -> f64 {
        self.unit.to_hours(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_priority_orders_most_specific_first() {
        assert!(UserScope::UsersWithTags.priority() < UserScope::UsersWithNoTags.priority());
        assert!(UserScope::UsersWithNoTags.priority() < UserScope::AllUsers.priority());
    }

    #[test]
    fn unit_conversion_to_hours() {
        assert_eq!(WindowUnit::Hours.to_hours(5.0), 5.0);
        assert_eq!(WindowUnit::Days.to_hours(2.0), 48.0);
        assert_eq!(WindowUnit::Weeks.to_hours(1.0), 168.0);
    }

    #[test]
    fn rule_decodes_from_wire_shape() {
        let raw = r#"{
            "user_scope": "users_with_tags",
            "tags": ["Sales Team"],
            "constraint": "less_than",
            "value": 30,
            "unit": "days",
            "spaces": ["Desk 1"]
        }"#;
        let rule: BookingWindowRule = serde_json::from_str(raw).unwrap();
        assert_eq!(rule.user_scope, UserScope::UsersWithTags);
        assert_eq!(rule.window_hours(), 720.0);
    }
}
