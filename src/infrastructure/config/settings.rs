//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Every section is optional; missing values fall back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use pricegap::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::engine::EngineSettings;
use super::logging::LoggingConfig;
use super::sources::{ResolverSettings, SourcesSettings};
use crate::application::EngineConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Deadlines and detection threshold.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Identifier cache settings.
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Which sources to query and how to probe them.
    #[serde(default)]
    pub sources: SourcesSettings,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let engine = &self.engine;
        if engine.round_deadline_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "round_deadline_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if engine.call_deadline_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "call_deadline_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !is_share(engine.resolution_share) {
            return Err(ConfigError::InvalidValue {
                field: "resolution_share",
                reason: "must be in (0, 1]".to_string(),
            }
            .into());
        }
        if !is_share(engine.fanout_share) {
            return Err(ConfigError::InvalidValue {
                field: "fanout_share",
                reason: "must be in (0, 1]".to_string(),
            }
            .into());
        }
        if engine.min_profit_percent < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_profit_percent",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        if self.sources.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.sources.enabled.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "enabled",
                reason: "source names must not be blank".to_string(),
            }
            .into());
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        Ok(())
    }

    /// Engine settings in the form the engine consumes.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::from(self)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn is_share(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        let engine = &config.engine;
        Self {
            round_deadline: engine.round_deadline(),
            call_deadline: engine.call_deadline(),
            resolution_share: engine.resolution_share,
            fanout_share: engine.fanout_share,
            min_profit_percent: engine.min_profit_percent,
        }
    }
}
