//! Learner profile aggregate and versioned updates.

mod patch;
mod profile;

pub use patch::ProfilePatch;
pub use profile::{LearnerProfile, ProfileVersion, StyleSuggestion};
