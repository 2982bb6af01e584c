//! Filesystem adapters for the persistence ports.
//!
//! Layout under the configured data directory:
//!
//! ```text
//! {data_dir}/learners/{learner_id}/profile.json
//! {data_dir}/learners/{learner_id}/interactions.jsonl
//! {data_dir}/learners/{learner_id}/difficulty.json
//! ```
//!
//! All full-file writes go through a temporary file and rename, which is
//! atomic on Unix.

mod difficulty;
mod interactions;
mod profile;
mod records;

pub use difficulty::FsDifficultyStateRepository;
pub use interactions::FsInteractionStore;
pub use profile::FsProfileRepository;

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::LearnerId;
use crate::ports::PersistenceError;

pub(crate) fn learner_dir(base_dir: &Path, learner_id: &LearnerId) -> PathBuf {
    base_dir.join("learners").join(learner_id.as_str())
}

pub(crate) async fn ensure_parent_exists(path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| PersistenceError::Io(format!("Failed to create directory: {}", e)))?;
    }
    Ok(())
}

/// Writes a file atomically via a temporary file and rename.
pub(crate) async fn write_atomic(path: &Path, content: &str) -> Result<(), PersistenceError> {
    ensure_parent_exists(path).await?;

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| PersistenceError::Io(format!("Failed to write temporary file: {}", e)))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| PersistenceError::Io(format!("Failed to rename file: {}", e)))?;
    Ok(())
}
