//! In-memory adapters for the persistence ports.
//!
//! Used by tests and the demo binary. Insertion order of appended events is
//! preserved, matching the durable adapters.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::adapters::compute_checksum;
use crate::domain::assessment::DifficultyState;
use crate::domain::foundation::{LearnerId, Timestamp};
use crate::domain::interaction::Interaction;
use crate::domain::profile::LearnerProfile;
use crate::ports::{
    DifficultyStateRepository, InteractionStore, LogExport, PersistenceError, ProfileRepository,
};

/// In-memory profile repository.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<LearnerId, LearnerProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn save(&self, profile: &LearnerProfile) -> Result<(), PersistenceError> {
        self.profiles
            .write()
            .await
            .insert(profile.learner_id().clone(), profile.clone());
        Ok(())
    }

    async fn find(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, PersistenceError> {
        Ok(self.profiles.read().await.get(learner_id).cloned())
    }

    async fn delete(&self, learner_id: &LearnerId) -> Result<(), PersistenceError> {
        self.profiles.write().await.remove(learner_id);
        Ok(())
    }
}

/// In-memory append-only interaction store.
#[derive(Default)]
pub struct InMemoryInteractionStore {
    events: RwLock<Vec<Interaction>>,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InteractionStore for InMemoryInteractionStore {
    async fn append(&self, event: &Interaction) -> Result<(), PersistenceError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn load_for(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Vec<Interaction>, PersistenceError> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.learner_id() == learner_id)
            .cloned()
            .collect())
    }

    async fn export(&self, learner_id: &LearnerId) -> Result<LogExport, PersistenceError> {
        let events = self.load_for(learner_id).await?;
        let mut content = String::new();
        for event in &events {
            let line =
                serde_json::to_string(event).map_err(PersistenceError::serialization)?;
            content.push_str(&line);
            content.push('\n');
        }
        Ok(LogExport {
            checksum: compute_checksum(&content),
            content,
            exported_at: Timestamp::now(),
        })
    }
}

/// In-memory difficulty state repository keyed by (learner, topic).
#[derive(Default)]
pub struct InMemoryDifficultyStateRepository {
    states: RwLock<HashMap<(LearnerId, String), DifficultyState>>,
}

impl InMemoryDifficultyStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DifficultyStateRepository for InMemoryDifficultyStateRepository {
    async fn save(&self, state: &DifficultyState) -> Result<(), PersistenceError> {
        self.states.write().await.insert(
            (state.learner_id().clone(), state.topic().to_string()),
            state.clone(),
        );
        Ok(())
    }

    async fn find(
        &self,
        learner_id: &LearnerId,
        topic: &str,
    ) -> Result<Option<DifficultyState>, PersistenceError> {
        Ok(self
            .states
            .read()
            .await
            .get(&(learner_id.clone(), topic.to_string()))
            .cloned())
    }

    async fn list_for(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Vec<DifficultyState>, PersistenceError> {
        let mut states: Vec<DifficultyState> = self
            .states
            .read()
            .await
            .values()
            .filter(|s| s.learner_id() == learner_id)
            .cloned()
            .collect();
        states.sort_by(|a, b| a.topic().cmp(b.topic()));
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DifficultyTier;

    fn learner() -> LearnerId {
        LearnerId::new("learner-1").unwrap()
    }

    fn ts(offset: i64) -> Timestamp {
        Timestamp::from_unix(1_700_000_000 + offset).unwrap()
    }

    #[tokio::test]
    async fn interaction_store_preserves_order_and_filters_by_learner() {
        let store = InMemoryInteractionStore::new();
        let other = LearnerId::new("learner-2").unwrap();

        for (who, offset) in [(learner(), 0), (other.clone(), 5), (learner(), 10)] {
            let event =
                Interaction::answer(who, ts(offset), "fractions", true, DifficultyTier::Beginner)
                    .unwrap();
            store.append(&event).await.unwrap();
        }

        let events = store.load_for(&learner()).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].timestamp().is_before(&events[1].timestamp()));
    }

    #[tokio::test]
    async fn export_checksum_matches_content() {
        let store = InMemoryInteractionStore::new();
        let event =
            Interaction::answer(learner(), ts(0), "fractions", true, DifficultyTier::Beginner)
                .unwrap();
        store.append(&event).await.unwrap();

        let export = store.export(&learner()).await.unwrap();
        assert_eq!(export.checksum, compute_checksum(&export.content));
        assert_eq!(export.content.lines().count(), 1);
    }

    #[tokio::test]
    async fn profile_repository_round_trips() {
        let repo = InMemoryProfileRepository::new();
        assert!(repo.find(&learner()).await.unwrap().is_none());

        let profile = LearnerProfile::new(
            learner(),
            crate::domain::foundation::LearningStyle::Visual,
            ["algebra".to_string()].into_iter().collect(),
            None,
            vec![],
            ts(0),
        )
        .unwrap();
        repo.save(&profile).await.unwrap();

        let found = repo.find(&learner()).await.unwrap().unwrap();
        assert_eq!(found, profile);

        repo.delete(&learner()).await.unwrap();
        assert!(repo.find(&learner()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn difficulty_repository_lists_states_sorted_by_topic() {
        let repo = InMemoryDifficultyStateRepository::new();
        for topic in ["geometry", "algebra"] {
            let state = DifficultyState::initial(learner(), topic, DifficultyTier::Beginner);
            repo.save(&state).await.unwrap();
        }

        let states = repo.list_for(&learner()).await.unwrap();
        let topics: Vec<&str> = states.iter().map(|s| s.topic()).collect();
        assert_eq!(topics, vec!["algebra", "geometry"]);
    }
}
