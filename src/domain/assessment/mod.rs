//! Difficulty tier decisions per learner and topic.

mod controller;
mod state;

pub use controller::{DifficultyConfig, DifficultyController, TierChange};
pub use state::DifficultyState;
