//! Errors surfaced by persistence adapters.

use thiserror::Error;

/// Failure at the persistence boundary.
///
/// Transient failures are retried with bounded backoff by the application
/// layer; on exhaustion the error is surfaced to the caller and in-memory
/// state is rolled back.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    pub fn io(err: impl std::fmt::Display) -> Self {
        Self::Io(err.to_string())
    }

    pub fn serialization(err: impl std::fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }
}
