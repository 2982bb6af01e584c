//! Serialized record shapes for the filesystem stores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::assessment::DifficultyState;
use crate::domain::foundation::{DifficultyTier, LearnerId, LearningStyle, Timestamp};
use crate::domain::profile::{LearnerProfile, ProfileVersion, StyleSuggestion};
use crate::ports::PersistenceError;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StyleSuggestionRecord {
    pub style: LearningStyle,
    pub confidence: f64,
}

/// Durable profile record.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProfileRecord {
    pub learner_id: String,
    pub learning_style: LearningStyle,
    pub subjects: Vec<String>,
    pub difficulty_preference: Option<DifficultyTier>,
    pub goals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub style_suggestion: Option<StyleSuggestionRecord>,
    pub version: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&LearnerProfile> for ProfileRecord {
    fn from(profile: &LearnerProfile) -> Self {
        Self {
            learner_id: profile.learner_id().as_str().to_string(),
            learning_style: profile.learning_style(),
            subjects: profile.subjects().iter().cloned().collect(),
            difficulty_preference: profile.difficulty_preference(),
            goals: profile.goals().to_vec(),
            style_suggestion: profile.style_suggestion().map(|s| StyleSuggestionRecord {
                style: s.style(),
                confidence: s.confidence(),
            }),
            version: profile.version().as_u32(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        }
    }
}

impl ProfileRecord {
    pub fn into_profile(self) -> Result<LearnerProfile, PersistenceError> {
        let learner_id = LearnerId::new(self.learner_id)
            .map_err(PersistenceError::serialization)?;
        let subjects: BTreeSet<String> = self.subjects.into_iter().collect();
        let suggestion = self
            .style_suggestion
            .map(|s| StyleSuggestion::new(s.style, s.confidence))
            .transpose()
            .map_err(PersistenceError::serialization)?;
        let version = ProfileVersion::from_u32(self.version)
            .map_err(PersistenceError::serialization)?;

        LearnerProfile::from_parts(
            learner_id,
            self.learning_style,
            subjects,
            self.difficulty_preference,
            self.goals,
            suggestion,
            version,
            self.created_at,
            self.updated_at,
        )
        .map_err(PersistenceError::serialization)
    }
}

/// Durable difficulty state record.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DifficultyStateRecord {
    pub learner_id: String,
    pub topic: String,
    pub tier: DifficultyTier,
    pub consecutive_correct: u32,
    pub consecutive_incorrect: u32,
}

impl From<&DifficultyState> for DifficultyStateRecord {
    fn from(state: &DifficultyState) -> Self {
        Self {
            learner_id: state.learner_id().as_str().to_string(),
            topic: state.topic().to_string(),
            tier: state.tier(),
            consecutive_correct: state.consecutive_correct(),
            consecutive_incorrect: state.consecutive_incorrect(),
        }
    }
}

impl DifficultyStateRecord {
    pub fn into_state(self) -> Result<DifficultyState, PersistenceError> {
        let learner_id = LearnerId::new(self.learner_id)
            .map_err(PersistenceError::serialization)?;
        Ok(DifficultyState::from_parts(
            learner_id,
            self.topic,
            self.tier,
            self.consecutive_correct,
            self.consecutive_incorrect,
        ))
    }
}
