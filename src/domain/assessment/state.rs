//! Per-(learner, topic) difficulty state record.

use crate::domain::foundation::{DifficultyTier, LearnerId};

/// Difficulty state for one learner and topic.
///
/// Counters are tier-scoped: any promotion or demotion resets both. The
/// [`DifficultyController`](super::DifficultyController) is the sole writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyState {
    learner_id: LearnerId,
    topic: String,
    tier: DifficultyTier,
    consecutive_correct: u32,
    consecutive_incorrect: u32,
}

impl DifficultyState {
    /// Initial state at the learner's declared preference (or beginner).
    pub fn initial(learner_id: LearnerId, topic: impl Into<String>, tier: DifficultyTier) -> Self {
        Self {
            learner_id,
            topic: topic.into(),
            tier,
            consecutive_correct: 0,
            consecutive_incorrect: 0,
        }
    }

    /// Restores a state from persisted parts. Used by repository adapters.
    pub fn from_parts(
        learner_id: LearnerId,
        topic: impl Into<String>,
        tier: DifficultyTier,
        consecutive_correct: u32,
        consecutive_incorrect: u32,
    ) -> Self {
        Self {
            learner_id,
            topic: topic.into(),
            tier,
            consecutive_correct,
            consecutive_incorrect,
        }
    }

    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    pub fn consecutive_incorrect(&self) -> u32 {
        self.consecutive_incorrect
    }

    pub(super) fn record_correct(&mut self) {
        self.consecutive_correct += 1;
        self.consecutive_incorrect = 0;
    }

    pub(super) fn record_incorrect(&mut self) {
        self.consecutive_incorrect += 1;
        self.consecutive_correct = 0;
    }

    pub(super) fn move_to(&mut self, tier: DifficultyTier) {
        self.tier = tier;
        self.consecutive_correct = 0;
        self.consecutive_incorrect = 0;
    }
}
