//! ProfileRepository port for profile persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::LearnerId;
use crate::domain::profile::LearnerProfile;

use super::PersistenceError;

/// Repository owning the durable learner profile record.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Creates or updates a profile.
    async fn save(&self, profile: &LearnerProfile) -> Result<(), PersistenceError>;

    /// Finds a profile by learner ID.
    async fn find(&self, learner_id: &LearnerId) -> Result<Option<LearnerProfile>, PersistenceError>;

    /// Deletes a profile. Idempotent.
    async fn delete(&self, learner_id: &LearnerId) -> Result<(), PersistenceError>;
}
