//! Application configuration.
//!
//! The configuration file is optional YAML. A missing file or missing keys
//! fall back to defaults; invalid power zone rules are rejected when the file
//! is loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metrics::zone_config::{PowerZoneConfiguration, PowerZoneSettings};

/// Duration given to steps that end on a lap button press.
pub const DEFAULT_LAP_BUTTON_DURATION_SECONDS: u32 = 30;

/// Configuration file as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Power target weighting rules
    #[serde(default)]
    pub power_zones: PowerZoneSettings,
    /// Seconds assumed for lap-button steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lap_button_duration_seconds: Option<u32>,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Power target weighting rules
    pub power_zones: PowerZoneConfiguration,
    /// Seconds assumed for lap-button steps
    pub lap_button_duration_seconds: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            power_zones: PowerZoneConfiguration::default(),
            lap_button_duration_seconds: DEFAULT_LAP_BUTTON_DURATION_SECONDS,
        }
    }
}

impl AppConfig {
    /// Validate a parsed configuration file.
    pub fn from_file(file: &ConfigFile) -> Result<Self, ConfigError> {
        Ok(Self {
            power_zones: PowerZoneConfiguration::from_settings(&file.power_zones)?,
            lap_button_duration_seconds: file
                .lap_button_duration_seconds
                .unwrap_or(DEFAULT_LAP_BUTTON_DURATION_SECONDS),
        })
    }

    /// Parse and validate YAML content. Empty content yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let file: ConfigFile =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_file(&file)
    }
}

/// Get the application configuration directory.
pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "whooshsync", "WhooshSync")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default configuration file path.
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from a file, using defaults if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config = AppConfig::from_yaml(&content)?;
    tracing::info!("Loaded configuration from {}", path.display());

    Ok(config)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Zone 7 cannot specify a weight, use a multiplier instead")]
    Zone7Weight,

    #[error("Invalid weight{}: must be between 0 and 1, got {weight}", zone_suffix(.zone))]
    InvalidWeight { zone: Option<u8>, weight: f64 },

    #[error("Invalid multiplier for zone 7: must be at least 1, got {0}")]
    InvalidMultiplier(f64),

    #[error("Only zone 7 accepts a multiplier, got one for zone {0}")]
    MultiplierNotAllowed(u8),

    #[error("Unknown power zone {0}")]
    UnknownZone(u8),
}

fn zone_suffix(zone: &Option<u8>) -> String {
    zone.map(|z| format!(" for zone {}", z)).unwrap_or_default()
}
