//! InteractionStore port for the durable append-only event log.

use async_trait::async_trait;

use crate::domain::foundation::{LearnerId, Timestamp};
use crate::domain::interaction::Interaction;

use super::PersistenceError;

/// A serialized export of one learner's raw log with an integrity checksum.
#[derive(Debug, Clone)]
pub struct LogExport {
    /// JSON Lines, one interaction record per line, insertion order.
    pub content: String,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
    pub exported_at: Timestamp,
}

/// Durable store for interaction events.
///
/// Append-only: events are never mutated or deleted except through the
/// export/retention operations owned here.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Durably appends one event.
    async fn append(&self, event: &Interaction) -> Result<(), PersistenceError>;

    /// Loads all events for a learner in insertion order.
    async fn load_for(&self, learner_id: &LearnerId) -> Result<Vec<Interaction>, PersistenceError>;

    /// Exports a learner's raw log for retention/backup.
    async fn export(&self, learner_id: &LearnerId) -> Result<LogExport, PersistenceError>;
}
