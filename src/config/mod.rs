//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `METACOG_PATTERNS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use metacog_patterns::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Scoring {}", config.io.input.display());
//! ```

mod error;
mod io;
mod logging;
mod scoring;

pub use error::{ConfigError, ValidationError};
pub use io::IoConfig;
pub use logging::LoggingConfig;
pub use scoring::{GateKind, ScoringConfig};

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "METACOG_PATTERNS";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rubric, granularity and classifier gate
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Input transcript and output records
    #[serde(default)]
    pub io: IoConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `METACOG_PATTERNS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `METACOG_PATTERNS__IO__INPUT=chats.jsonl` -> `io.input = chats.jsonl`
    /// - `METACOG_PATTERNS__SCORING__GRANULARITY=conversation` -> `scoring.granularity`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_file(None)
    }

    /// Like [`AppConfig::load`], layering environment variables over a
    /// YAML/TOML/JSON file when one is given.
    pub fn load_with_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.io.validate()?;
        self.scoring.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
