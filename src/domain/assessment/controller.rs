//! Deterministic difficulty tier transitions.

use serde::Deserialize;

use crate::domain::foundation::{DifficultyTier, LearnerId, StateMachine};

use super::DifficultyState;

/// Thresholds for tier transitions.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DifficultyConfig {
    /// Consecutive correct answers at a tier required to promote.
    #[serde(default = "default_promote_after")]
    pub promote_after: u32,
    /// Consecutive incorrect answers at a tier required to demote.
    #[serde(default = "default_demote_after")]
    pub demote_after: u32,
}

fn default_promote_after() -> u32 {
    3
}

fn default_demote_after() -> u32 {
    2
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            promote_after: default_promote_after(),
            demote_after: default_demote_after(),
        }
    }
}

/// Outcome of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierChange {
    Promoted(DifficultyTier),
    Demoted(DifficultyTier),
    Unchanged,
}

/// Decides the next quiz difficulty tier for a learner and topic.
///
/// A small state machine over {beginner, intermediate, advanced}: reaching
/// the promote threshold moves one tier up (capped), reaching the demote
/// threshold moves one tier down (floored), and any actual move resets both
/// counters. The state is fully reproducible by replaying the topic's answer
/// events from the initial tier.
#[derive(Debug, Clone)]
pub struct DifficultyController {
    config: DifficultyConfig,
}

impl DifficultyController {
    pub fn new(config: DifficultyConfig) -> Self {
        Self { config }
    }

    /// Evaluates one graded answer against the current state.
    pub fn on_answer(&self, state: &mut DifficultyState, correct: bool) -> TierChange {
        if correct {
            state.record_correct();
            if state.consecutive_correct() >= self.config.promote_after {
                let target = state.tier().promoted();
                if state.tier().can_transition_to(&target) {
                    state.move_to(target);
                    return TierChange::Promoted(target);
                }
                // Already at the cap: stay, no error.
            }
        } else {
            state.record_incorrect();
            if state.consecutive_incorrect() >= self.config.demote_after {
                let target = state.tier().demoted();
                if state.tier().can_transition_to(&target) {
                    state.move_to(target);
                    return TierChange::Demoted(target);
                }
                // Already at the floor: stay, no error.
            }
        }
        TierChange::Unchanged
    }

    /// Rebuilds the state by replaying a topic's graded answers from the
    /// initial tier.
    pub fn replay(
        &self,
        learner_id: LearnerId,
        topic: impl Into<String>,
        initial_tier: DifficultyTier,
        answers: impl IntoIterator<Item = bool>,
    ) -> DifficultyState {
        let mut state = DifficultyState::initial(learner_id, topic, initial_tier);
        for correct in answers {
            self.on_answer(&mut state, correct);
        }
        state
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DifficultyConfig::default())
    }
}
