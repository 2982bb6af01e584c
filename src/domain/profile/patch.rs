//! Versioned profile update requests.

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::domain::foundation::{DifficultyTier, LearningStyle};

/// An explicit user edit to a learner profile.
///
/// Fixed-shape: unknown fields are rejected at deserialization rather than
/// silently accepted. `expected_version`, when present, must match the
/// profile's current version or the patch is refused.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    #[serde(default)]
    pub expected_version: Option<u32>,
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
    #[serde(default)]
    pub subjects: Option<BTreeSet<String>>,
    #[serde(default)]
    pub difficulty_preference: Option<DifficultyTier>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
}

impl ProfilePatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.learning_style.is_none()
            && self.subjects.is_none()
            && self.difficulty_preference.is_none()
            && self.goals.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_partial_patch() {
        let patch: ProfilePatch = serde_json::from_value(json!({
            "learning_style": "auditory",
            "goals": ["finish unit 3"]
        }))
        .unwrap();

        assert_eq!(patch.learning_style, Some(LearningStyle::Auditory));
        assert_eq!(patch.goals.as_deref(), Some(&["finish unit 3".to_string()][..]));
        assert!(patch.subjects.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<ProfilePatch, _> = serde_json::from_value(json!({
            "learning_style": "visual",
            "favourite_colour": "green"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_style_value() {
        let result: Result<ProfilePatch, _> = serde_json::from_value(json!({
            "learning_style": "osmosis"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch = ProfilePatch::default();
        assert!(patch.is_empty());
    }
}
