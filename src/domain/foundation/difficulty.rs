//! Difficulty tier enumeration and its transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Quiz difficulty tier.
///
/// Tiers only move one step at a time; promotion at the cap and demotion at
/// the floor are no-ops, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// The tier one step up, saturating at Advanced.
    pub fn promoted(&self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            Self::Intermediate => Self::Advanced,
            Self::Advanced => Self::Advanced,
        }
    }

    /// The tier one step down, saturating at Beginner.
    pub fn demoted(&self) -> Self {
        match self {
            Self::Beginner => Self::Beginner,
            Self::Intermediate => Self::Beginner,
            Self::Advanced => Self::Intermediate,
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::Beginner
    }
}

impl StateMachine for DifficultyTier {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DifficultyTier::*;
        matches!(
            (self, target),
            (Beginner, Intermediate)
                | (Intermediate, Beginner)
                | (Intermediate, Advanced)
                | (Advanced, Intermediate)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DifficultyTier::*;
        match self {
            Beginner => vec![Intermediate],
            Intermediate => vec![Beginner, Advanced],
            Advanced => vec![Intermediate],
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DifficultyTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ValidationError::invalid_format(
                "difficulty_tier",
                format!("unknown tier '{}'", other),
            )),
        }
    }
}
