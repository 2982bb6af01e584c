//! Application-level error type.

use thiserror::Error;

use crate::domain::foundation::{LearnerId, ValidationError};
use crate::ports::PersistenceError;

/// Failure surfaced by the [`LearningEngine`](super::LearningEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("No profile exists for learner '{0}'")]
    ProfileNotFound(LearnerId),
}
