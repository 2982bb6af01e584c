//! Engine tuning knobs.

use serde::Deserialize;

use crate::domain::assessment::DifficultyConfig;
use crate::domain::recommendation::RecommendationWeights;

use super::error::ConfigError;

/// Bounded exponential backoff for persistence writes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each subsequent one.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    50
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

/// Configuration for the learning engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Tier promotion/demotion thresholds.
    #[serde(default)]
    pub difficulty: DifficultyConfig,

    /// Recommendation scoring weights.
    #[serde(default)]
    pub recommendation: RecommendationWeights,

    /// Backoff policy for persistence writes.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Minimum confidence for a learning-style suggestion to be stored.
    #[serde(default = "default_style_confidence_threshold")]
    pub style_confidence_threshold: f64,
}

fn default_style_confidence_threshold() -> f64 {
    0.7
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyConfig::default(),
            recommendation: RecommendationWeights::default(),
            retry: RetryConfig::default(),
            style_confidence_threshold: default_style_confidence_threshold(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty.promote_after == 0 {
            return Err(ConfigError::invalid(
                "engine.difficulty.promote_after",
                "must be at least 1",
            ));
        }
        if self.difficulty.demote_after == 0 {
            return Err(ConfigError::invalid(
                "engine.difficulty.demote_after",
                "must be at least 1",
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "engine.retry.max_attempts",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.style_confidence_threshold) {
            return Err(ConfigError::invalid(
                "engine.style_confidence_threshold",
                format!("{} is outside [0, 1]", self.style_confidence_threshold),
            ));
        }
        for (name, weight) in [
            ("weight_weakness", self.recommendation.weight_weakness),
            ("weight_recency", self.recommendation.weight_recency),
            ("weight_affinity", self.recommendation.weight_affinity),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::invalid(
                    "engine.recommendation",
                    format!("{} must be a non-negative number", name),
                ));
            }
        }
        Ok(())
    }
}
