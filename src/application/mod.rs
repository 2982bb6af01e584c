//! Application layer - the engine facade over domain and ports.
//!
//! Orchestrates domain operations per learner: serialized writes, bounded
//! retry against the persistence collaborator, and rollback of in-memory
//! state when persistence is exhausted.

mod engine;
mod error;

pub use engine::LearningEngine;
pub use error::EngineError;
