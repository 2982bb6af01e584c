//! DifficultyStateRepository port for per-(learner, topic) tier state.

use async_trait::async_trait;

use crate::domain::assessment::DifficultyState;
use crate::domain::foundation::LearnerId;

use super::PersistenceError;

/// Repository for difficulty state records.
#[async_trait]
pub trait DifficultyStateRepository: Send + Sync {
    /// Creates or updates the state for (learner, topic).
    async fn save(&self, state: &DifficultyState) -> Result<(), PersistenceError>;

    /// Finds the state for one learner and topic.
    async fn find(
        &self,
        learner_id: &LearnerId,
        topic: &str,
    ) -> Result<Option<DifficultyState>, PersistenceError>;

    /// Lists all states for a learner.
    async fn list_for(&self, learner_id: &LearnerId)
        -> Result<Vec<DifficultyState>, PersistenceError>;
}
