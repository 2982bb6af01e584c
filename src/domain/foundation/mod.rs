//! Shared domain primitives.
//!
//! Value objects used across the domain: identifiers, timestamps, the
//! learning-style and difficulty-tier enumerations, the state machine trait,
//! and validation errors.

mod difficulty;
mod errors;
mod ids;
mod learning_style;
mod state_machine;
mod timestamp;

pub use difficulty::DifficultyTier;
pub use errors::ValidationError;
pub use ids::LearnerId;
pub use learning_style::LearningStyle;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
