//! Error types for bookable.
//!
//! All errors are strongly typed using thiserror. Rule-driven rejections
//! are *not* errors: a well-formed request always yields a
//! [`SimulationResult`](crate::SimulationResult). Errors here cover input
//! validation (malformed times and durations) and rule-set parsing.

use thiserror::Error;

/// Validation errors that occur while interpreting request or rule data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The requested end time does not come after the start time.
    ///
    /// This is the engine's only hard stop: it terminates an evaluation
    /// before any rule family runs.
    #[error("End time must be after start time")]
    NonPositiveDuration,

    /// A wall-clock string did not match the `HH:MM` 24-hour format.
    #[error("Invalid wall-clock time '{input}': expected HH:MM")]
    InvalidClockTime {
        /// The offending input.
        input: String,
    },

    /// A duration string did not match the supported grammar.
    #[error("Invalid duration '{input}': expected forms like \"2h\", \"30min\" or \"1h30min\"")]
    InvalidDuration {
        /// The offending input.
        input: String,
    },

    /// A calendar date string could not be parsed.
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The offending input.
        input: String,
    },
}

/// Errors raised while decoding a rule set from its wire representation.
#[derive(Debug, Error)]
pub enum RuleSetError {
    /// The `parsed_rule_blocks` envelope was not valid JSON for the
    /// expected shape.
    #[error("Failed to parse rule blocks: {message}")]
    Parse {
        /// Decoder diagnostic.
        message: String,
    },
}

/// Top-level error type for bookable.
#[derive(Debug, Error)]
pub enum BookableError {
    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Rule-set decoding failed.
    #[error("Rule set error: {0}")]
    RuleSet(#[from] RuleSetError),
}

impl BookableError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a rule-set decoding error.
    #[must_use]
    pub const fn is_rule_set(&self) -> bool {
        matches!(self, Self::RuleSet(_))
    }
}

/// Result type alias for bookable operations.
pub type BookableResult<T> = Result<T, BookableError>;
