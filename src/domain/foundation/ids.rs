//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const MAX_LEARNER_ID_LEN: usize = 128;

/// Stable identifier for a learner.
///
/// Learner IDs are caller-supplied strings (account names, emails). They are
/// used as directory names by the filesystem adapters, so path separators and
/// parent references are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(String);

impl LearnerId {
    /// Creates a validated LearnerId.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("learner_id"));
        }
        if id.len() > MAX_LEARNER_ID_LEN {
            return Err(ValidationError::invalid_format(
                "learner_id",
                format!("exceeds {} characters", MAX_LEARNER_ID_LEN),
            ));
        }
        if id.contains('/') || id.contains('\\') || id.contains("..") {
            return Err(ValidationError::invalid_format(
                "learner_id",
                "must not contain path separators or '..'",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LearnerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
