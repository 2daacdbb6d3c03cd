//! Application configuration.

use crate::error::{AppError, AppResult};
use pairmm_mm::MakerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Strategy parameters.
    #[serde(default)]
    pub maker: MakerConfig,
    /// Capacity of the event channel between reader and engine.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

fn default_event_channel_capacity() -> usize {
    1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            maker: MakerConfig::default(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `PAIRMM_CONFIG` or the default path.
    ///
    /// Falls back to defaults when the default file does not exist.
    pub fn load() -> AppResult<Self> {
        if let Ok(path) = std::env::var("PAIRMM_CONFIG") {
            tracing::info!(config_path = %path, "Loading configuration");
            return Self::from_file(&path);
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            tracing::info!(config_path = DEFAULT_CONFIG_PATH, "Loading configuration");
            return Self::from_file(DEFAULT_CONFIG_PATH);
        }
        tracing::warn!(
            config_path = DEFAULT_CONFIG_PATH,
            "Config file not found, using defaults"
        );
        Ok(Self::default())
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Validate all sections.
    pub fn validate(&self) -> AppResult<()> {
        if self.event_channel_capacity == 0 {
            return Err(AppError::Config(
                "event_channel_capacity must be > 0".to_string(),
            ));
        }
        self.maker.validate()?;
        Ok(())
    }
}
