//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `profile` - Learner profile aggregate and versioned updates
//! - `interaction` - Immutable learning events and the append-only log
//! - `analytics` - Derived metrics recomputable from the interaction log
//! - `assessment` - Difficulty tier state machine per learner and topic
//! - `recommendation` - Topic ranking from profile and analytics signals

pub mod analytics;
pub mod assessment;
pub mod foundation;
pub mod interaction;
pub mod profile;
pub mod recommendation;
