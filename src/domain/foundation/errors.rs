//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised when a value object or interaction fails validation.
///
/// Validation failures are rejected synchronously and never partially
/// applied: a failed append leaves the log and snapshot untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Interaction for learner '{learner_id}' is out of order: {actual} is before {previous}")]
    OutOfOrderTimestamp {
        learner_id: String,
        previous: String,
        actual: String,
    },

    #[error("Correctness may only be set on answer interactions, got kind '{kind}'")]
    CorrectnessOnNonAnswer { kind: String },

    #[error("Profile version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u32, actual: u32 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out-of-order timestamp error.
    pub fn out_of_order(
        learner_id: impl Into<String>,
        previous: impl ToString,
        actual: impl ToString,
    ) -> Self {
        ValidationError::OutOfOrderTimestamp {
            learner_id: learner_id.into(),
            previous: previous.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates a correctness-on-non-answer error.
    pub fn correctness_on_non_answer(kind: impl ToString) -> Self {
        ValidationError::CorrectnessOnNonAnswer {
            kind: kind.to_string(),
        }
    }

    /// Creates a version conflict error.
    pub fn version_conflict(expected: u32, actual: u32) -> Self {
        ValidationError::VersionConflict { expected, actual }
    }
}
