//! # Bookable - Booking Rule Evaluation Engine
//!
//! Venue administrators describe booking policies in natural language; an
//! external service converts that text into a structured rule set. This
//! crate is the part that thinks: given such a rule set and a hypothetical
//! booking request (who, what space, what date/time range), it decides
//! whether the booking is allowed, computes its price, and produces a
//! human-readable justification.
//!
//! ## Core Concepts
//!
//! - **RuleSet**: the aggregate of all six rule-family arrays handed to one evaluation
//! - **SimulationInput**: the hypothetical booking to test
//! - **SimulationResult**: the verdict, price breakdown, and justification
//! - **EvalTrace**: an injectable record of every decision step
//!
//! Rules are exclusively restrictive: a booking is allowed unless some
//! rule family vetoes it, and an empty rule set allows everything. One
//! evaluation is a pure function of its inputs plus an injected clock, so
//! calls may run concurrently without coordination.
//!
//! ## Usage
//!
//! ```rust
//! use bookable::{evaluate, ParsedRuleBlocks, SimulationInput};
//! use chrono::{NaiveDate, Utc};
//!
//! let envelope = ParsedRuleBlocks::from_json(r#"{
//!     "parsed_rule_blocks": {
//!         "booking_window_rules": [{
//!             "user_scope": "all_users",
//!             "constraint": "less_than",
//!             "value": 30, "unit": "days",
//!             "spaces": ["Desk 1"]
//!         }]
//!     }
//! }"#).unwrap();
//!
//! let input = SimulationInput::new(
//!     "Desk 1",
//!     NaiveDate::from_ymd_opt(2099, 3, 2).unwrap(),
//!     "09:00".parse().unwrap(),
//!     "11:00".parse().unwrap(),
//! );
//!
//! let result = evaluate(&envelope.into_rule_set(), &input, Utc::now());
//! assert!(!result.allowed); // 2099 is rather more than 30 days out
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod duration;
pub mod error;
pub mod eval;
pub mod request;
pub mod rules;
pub mod trace;

// Re-export primary types at crate root for convenience
pub use clock::ClockTime;
pub use duration::DurationValue;
pub use error::{BookableError, BookableResult, RuleSetError, ValidationError};
pub use eval::{evaluate, evaluate_traced};
pub use request::{SimulationInput, SimulationResult, ANONYMOUS_TAG};
pub use rules::{
    BookingCondition, BookingWindowRule, BufferTimeRule, ConditionKind, ConditionOperator,
    ConditionRule, ConditionValue, LogicOperator, ParsedRuleBlocks, PricingRule, QuotaRule,
    RateUnit, RuleSet, SpaceSharingRule, TimeWindow, UserScope, WindowConstraint, WindowUnit,
};
pub use trace::{EvalStage, EvalTrace, TraceEvent};
