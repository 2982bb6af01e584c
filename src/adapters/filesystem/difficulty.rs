//! Filesystem difficulty state repository.
//!
//! All topics of a learner live in a single `difficulty.json` map, keyed by
//! topic, rewritten atomically on each save.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::assessment::DifficultyState;
use crate::domain::foundation::LearnerId;
use crate::ports::{DifficultyStateRepository, PersistenceError};

use super::records::DifficultyStateRecord;
use super::{learner_dir, write_atomic};

/// Stores per-(learner, topic) difficulty records.
pub struct FsDifficultyStateRepository {
    base_dir: PathBuf,
}

impl FsDifficultyStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, learner_id: &LearnerId) -> PathBuf {
        learner_dir(&self.base_dir, learner_id).join("difficulty.json")
    }

    async fn load_map(
        &self,
        learner_id: &LearnerId,
    ) -> Result<BTreeMap<String, DifficultyStateRecord>, PersistenceError> {
        let content = match fs::read_to_string(self.file_path(learner_id)).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(PersistenceError::io(e)),
        };
        serde_json::from_str(&content).map_err(PersistenceError::serialization)
    }

    async fn save_map(
        &self,
        learner_id: &LearnerId,
        map: &BTreeMap<String, DifficultyStateRecord>,
    ) -> Result<(), PersistenceError> {
        let content =
            serde_json::to_string_pretty(map).map_err(PersistenceError::serialization)?;
        write_atomic(&self.file_path(learner_id), &content).await
    }
}

#[async_trait]
impl DifficultyStateRepository for FsDifficultyStateRepository {
    async fn save(&self, state: &DifficultyState) -> Result<(), PersistenceError> {
        let mut map = self.load_map(state.learner_id()).await?;
        map.insert(state.topic().to_string(), DifficultyStateRecord::from(state));
        self.save_map(state.learner_id(), &map).await
    }

    async fn find(
        &self,
        learner_id: &LearnerId,
        topic: &str,
    ) -> Result<Option<DifficultyState>, PersistenceError> {
        let mut map = self.load_map(learner_id).await?;
        map.remove(topic).map(|r| r.into_state()).transpose()
    }

    async fn list_for(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Vec<DifficultyState>, PersistenceError> {
        let map = self.load_map(learner_id).await?;
        map.into_values().map(|r| r.into_state()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DifficultyTier;
    use tempfile::TempDir;

    fn learner() -> LearnerId {
        LearnerId::new("learner-1").unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FsDifficultyStateRepository::new(temp_dir.path());

        let state = DifficultyState::from_parts(
            learner(),
            "fractions",
            DifficultyTier::Intermediate,
            2,
            0,
        );
        repo.save(&state).await.unwrap();

        let found = repo.find(&learner(), "fractions").await.unwrap().unwrap();
        assert_eq!(found, state);
        assert!(repo.find(&learner(), "algebra").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_updates_existing_topic_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FsDifficultyStateRepository::new(temp_dir.path());

        let initial = DifficultyState::initial(learner(), "fractions", DifficultyTier::Beginner);
        repo.save(&initial).await.unwrap();

        let advanced = DifficultyState::from_parts(
            learner(),
            "fractions",
            DifficultyTier::Advanced,
            0,
            1,
        );
        repo.save(&advanced).await.unwrap();

        let states = repo.list_for(&learner()).await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].tier(), DifficultyTier::Advanced);
    }

    #[tokio::test]
    async fn list_for_returns_all_topics_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FsDifficultyStateRepository::new(temp_dir.path());

        for topic in ["geometry", "algebra", "fractions"] {
            let state = DifficultyState::initial(learner(), topic, DifficultyTier::Beginner);
            repo.save(&state).await.unwrap();
        }

        let states = repo.list_for(&learner()).await.unwrap();
        let topics: Vec<&str> = states.iter().map(|s| s.topic()).collect();
        assert_eq!(topics, vec!["algebra", "fractions", "geometry"]);
    }
}
