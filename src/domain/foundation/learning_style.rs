//! Learning-style enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A learner's preferred learning style.
///
/// Fixed enumeration; profiles never carry free-form style strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl LearningStyle {
    /// All styles, in declaration order.
    pub fn all() -> [LearningStyle; 4] {
        [
            Self::Visual,
            Self::Auditory,
            Self::Kinesthetic,
            Self::Reading,
        ]
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Visual => "visual",
            Self::Auditory => "auditory",
            Self::Kinesthetic => "kinesthetic",
            Self::Reading => "reading",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LearningStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "auditory" => Ok(Self::Auditory),
            "kinesthetic" => Ok(Self::Kinesthetic),
            "reading" => Ok(Self::Reading),
            other => Err(ValidationError::invalid_format(
                "learning_style",
                format!("unknown style '{}'", other),
            )),
        }
    }
}
