//! CLI configuration management

use anyhow::{Context, Result};
use event_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotmapConfig {
    /// Event store configuration
    pub store: StoreConfig,

    /// Analytics configuration
    pub analytics: AnalyticsSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analytics settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Default bin width in feet, used when `--bin-size` is not given
    pub bin_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self { bin_size: 5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "compact".to_string() }
    }
}

impl ShotmapConfig {
    /// Load configuration from an optional file, then environment variables, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ShotmapConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override with `SHOTMAP_*` variables read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = lookup("SHOTMAP_DATA_DIR") {
            self.store.data_dir = PathBuf::from(data_dir);
        }

        if let Some(bin_size) = lookup("SHOTMAP_BIN_SIZE") {
            self.analytics.bin_size = bin_size
                .trim()
                .parse()
                .with_context(|| format!("Invalid SHOTMAP_BIN_SIZE: {:?}", bin_size))?;
        }

        if let Some(level) = lookup("SHOTMAP_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("SHOTMAP_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.analytics.bin_size == 0 {
            return Err(anyhow::anyhow!("Invalid bin size: must be greater than 0"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            _ => return Err(anyhow::anyhow!("Invalid log format: {}", self.logging.format)),
        }

        Ok(())
    }
}
