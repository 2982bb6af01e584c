//! Derived learning metrics, recomputable from the interaction log.

mod inference;
mod snapshot;

pub use inference::{infer_style, MIN_EVENTS_FOR_INFERENCE};
pub use snapshot::{AnalyticsSnapshot, Anomaly, TopicStats, RECENT_TIER_WINDOW};
