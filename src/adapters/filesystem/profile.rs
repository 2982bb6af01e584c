//! Filesystem profile repository.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::LearnerId;
use crate::domain::profile::LearnerProfile;
use crate::ports::{PersistenceError, ProfileRepository};

use super::records::ProfileRecord;
use super::{learner_dir, write_atomic};

/// Stores one JSON profile record per learner.
pub struct FsProfileRepository {
    base_dir: PathBuf,
}

impl FsProfileRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, learner_id: &LearnerId) -> PathBuf {
        learner_dir(&self.base_dir, learner_id).join("profile.json")
    }
}

#[async_trait]
impl ProfileRepository for FsProfileRepository {
    async fn save(&self, profile: &LearnerProfile) -> Result<(), PersistenceError> {
        let record = ProfileRecord::from(profile);
        let content = serde_json::to_string_pretty(&record)
            .map_err(PersistenceError::serialization)?;
        write_atomic(&self.file_path(profile.learner_id()), &content).await
    }

    async fn find(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Option<LearnerProfile>, PersistenceError> {
        let path = self.file_path(learner_id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(e)),
        };
        let record: ProfileRecord =
            serde_json::from_str(&content).map_err(PersistenceError::serialization)?;
        record.into_profile().map(Some)
    }

    async fn delete(&self, learner_id: &LearnerId) -> Result<(), PersistenceError> {
        let path = self.file_path(learner_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Idempotent delete.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(e)),
        }
    }
}
