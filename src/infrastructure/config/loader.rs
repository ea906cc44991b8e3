use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::MAX_HIGHLIGHTS;

/// Project directory holding configuration files
pub const CONFIG_DIR: &str = ".dead-air";

/// Prefix for environment overrides, e.g. `DEAD_AIR_RETRY__MAX_ATTEMPTS=5`
pub const ENV_PREFIX: &str = "DEAD_AIR_";

/// Configuration error types
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid max_attempts: {0}. Must be at least 1")]
    InvalidMaxAttempts(u32),

    #[error("Invalid base_delay_secs: {0}. Must be finite and non-negative")]
    InvalidBaseDelay(f64),

    #[error("Invalid exchanges: {0}. Must be at least 1")]
    InvalidExchanges(usize),

    #[error("Invalid context_window_turns: {0}. Must be at least 1")]
    InvalidContextWindow(usize),

    #[error("Invalid highlight bounds: min_chars ({0}) must not exceed max_chars ({1})")]
    InvalidHighlightBounds(usize, usize),

    #[error("Invalid max_highlights: {0}. Must be at most 5")]
    InvalidMaxHighlights(usize),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .dead-air/config.yaml (project config)
    /// 3. .dead-air/local.yaml (local overrides, optional)
    /// 4. `ANTHROPIC_API_KEY` for `anthropic.api_key`
    /// 5. Environment variables (`DEAD_AIR_*` prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Load configuration with `root` as the project directory.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Self::environment())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Self::environment())
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// `ANTHROPIC_API_KEY`, then `DEAD_AIR_*` overrides (`__` separates levels).
    fn environment() -> Figment {
        Figment::new()
            .merge(
                Env::raw()
                    .only(&["ANTHROPIC_API_KEY"])
                    .map(|_| "anthropic.api_key".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(config.retry.max_attempts));
        }

        let delay = config.retry.base_delay_secs;
        if !delay.is_finite() || delay < 0.0 {
            return Err(ConfigError::InvalidBaseDelay(delay));
        }

        let dialogue = &config.dialogue;
        if dialogue.exchanges == 0 {
            return Err(ConfigError::InvalidExchanges(dialogue.exchanges));
        }

        if dialogue.context_window_turns == 0 {
            return Err(ConfigError::InvalidContextWindow(
                dialogue.context_window_turns,
            ));
        }

        if dialogue.show_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "dialogue.show_name cannot be empty".to_string(),
            ));
        }

        for (key, host) in [("host_a", &dialogue.host_a), ("host_b", &dialogue.host_b)] {
            if host.name.trim().is_empty() || host.short_name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "dialogue.{key} needs a name and short_name"
                )));
            }
        }

        if config.highlights.min_chars > config.highlights.max_chars {
            return Err(ConfigError::InvalidHighlightBounds(
                config.highlights.min_chars,
                config.highlights.max_chars,
            ));
        }

        if config.highlights.max_highlights > MAX_HIGHLIGHTS {
            return Err(ConfigError::InvalidMaxHighlights(
                config.highlights.max_highlights,
            ));
        }

        if config.anthropic.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "anthropic.model cannot be empty".to_string(),
            ));
        }

        if config.anthropic.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.anthropic.max_tokens));
        }

        if config.anthropic.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.anthropic.timeout_secs));
        }

        Ok(())
    }
}
