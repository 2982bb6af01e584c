//! Filesystem interaction store: one JSONL file per learner.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::adapters::compute_checksum;
use crate::domain::foundation::{LearnerId, Timestamp};
use crate::domain::interaction::Interaction;
use crate::ports::{InteractionStore, LogExport, PersistenceError};

use super::{ensure_parent_exists, learner_dir};

/// Append-only JSON Lines store for interaction events.
pub struct FsInteractionStore {
    base_dir: PathBuf,
}

impl FsInteractionStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, learner_id: &LearnerId) -> PathBuf {
        learner_dir(&self.base_dir, learner_id).join("interactions.jsonl")
    }

    async fn read_raw(&self, learner_id: &LearnerId) -> Result<String, PersistenceError> {
        match fs::read_to_string(self.file_path(learner_id)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(PersistenceError::io(e)),
        }
    }
}

#[async_trait]
impl InteractionStore for FsInteractionStore {
    async fn append(&self, event: &Interaction) -> Result<(), PersistenceError> {
        let path = self.file_path(event.learner_id());
        ensure_parent_exists(&path).await?;

        let mut line =
            serde_json::to_string(event).map_err(PersistenceError::serialization)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(PersistenceError::io)?;
        file.write_all(line.as_bytes())
            .await
            .map_err(PersistenceError::io)?;
        file.flush().await.map_err(PersistenceError::io)?;
        Ok(())
    }

    async fn load_for(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Vec<Interaction>, PersistenceError> {
        let content = self.read_raw(learner_id).await?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(PersistenceError::serialization))
            .collect()
    }

    async fn export(&self, learner_id: &LearnerId) -> Result<LogExport, PersistenceError> {
        let content = self.read_raw(learner_id).await?;
        Ok(LogExport {
            checksum: compute_checksum(&content),
            content,
            exported_at: Timestamp::now(),
        })
    }
}
