//! Application configuration.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `LEARNPULSE`
//! prefix and nested sections use `__` as the separator:
//!
//! - `LEARNPULSE__STORAGE__DATA_DIR=/var/lib/learnpulse`
//! - `LEARNPULSE__ENGINE__DIFFICULTY__PROMOTE_AFTER=3`

mod engine;
mod error;
mod storage;

pub use engine::{EngineConfig, RetryConfig};
pub use error::ConfigError;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
///
/// Every section has working defaults, so an empty environment yields a
/// usable development configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Engine tuning (difficulty thresholds, scoring weights, retry policy).
    #[serde(default)]
    pub engine: EngineConfig,

    /// Filesystem storage layout.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "learnpulse=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the environment, reading a `.env` file first
    /// when one is present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LEARNPULSE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
