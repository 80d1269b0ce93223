use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_MAX_WINDOW_DAYS, ENV_PREFIX};
use crate::error::CoreError;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub expansion: ExpansionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Longest `[start, end]` window, in days, a caller may request.
    pub max_window_days: u32,
    /// Clamp the single occurrence of a non-recurring event to the window.
    pub clamp_single_occurrences: bool,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and `almanac.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE_NAME)
    }

    /// ## Summary
    /// Loads configuration using `path` as the (optional) TOML file.
    ///
    /// Nested keys are read from the environment as
    /// `ALMANAC_EXPANSION__MAX_WINDOW_DAYS`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it
    /// fails, or if `expansion.max_window_days` is zero.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("expansion.max_window_days", DEFAULT_MAX_WINDOW_DAYS)?
            .set_default("expansion.clamp_single_occurrences", false)?
            // TOML file
            .add_source(config::File::with_name(path).required(false))
            // Env overrides file
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        if settings.expansion.max_window_days == 0 {
            return Err(CoreError::ConfigError(
                "expansion.max_window_days must be at least 1".to_string(),
            )
            .into());
        }
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(
        max_window_days = settings.expansion.max_window_days,
        clamp_single_occurrences = settings.expansion.clamp_single_occurrences,
        "Expansion settings resolved"
    );
    Ok(settings)
}
