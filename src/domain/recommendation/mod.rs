//! Topic ranking from profile and analytics signals.

mod engine;

pub use engine::{Recommendation, RecommendationEngine, RecommendationWeights};
