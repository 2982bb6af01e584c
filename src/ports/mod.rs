//! Ports - Interfaces for the persistence collaborator.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.

mod difficulty_repository;
mod error;
mod interaction_store;
mod profile_repository;

pub use difficulty_repository::DifficultyStateRepository;
pub use error::PersistenceError;
pub use interaction_store::{InteractionStore, LogExport};
pub use profile_repository::ProfileRepository;
