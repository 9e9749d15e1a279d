//! Keyboard configuration
//!
//! Read from `~/.config/flickboard/config.yaml`. The engine only reads it;
//! nothing here is ever written back by the keyboard itself.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::keyboard::{KeyValue, Modifier, ValueKind};

/// Errors that can occur when loading a configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Gesture and repeat settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Distance in pixels a finger must travel before it swipes
    pub swipe_dist_px: f32,
    /// Delay before a held key starts repeating
    pub long_press_timeout_ms: u64,
    /// Delay between two repeats
    pub long_press_interval_ms: u64,
    /// Modulate the repeat of slider keys by the swipe distance
    pub precise_repeat: bool,
    /// Modifiers that lock when pressed twice
    pub lockable_modifiers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swipe_dist_px: 23.,
            long_press_timeout_ms: 600,
            long_press_interval_ms: 65,
            precise_repeat: true,
            lockable_modifiers: vec!["shift".to_string()],
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.swipe_dist_px.is_finite() || self.swipe_dist_px < 0. {
            return Err(ConfigError::Invalid(format!(
                "swipe_dist_px must be a non-negative number, got {}",
                self.swipe_dist_px
            )));
        }
        if self.long_press_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "long_press_timeout_ms must be positive".to_string(),
            ));
        }
        if self.long_press_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "long_press_interval_ms must be positive".to_string(),
            ));
        }
        self.lockable()?;
        Ok(())
    }

    /// The lockable modifiers, parsed
    pub fn lockable(&self) -> Result<Vec<Modifier>, ConfigError> {
        self.lockable_modifiers
            .iter()
            .map(|name| match KeyValue::parse(name).map(|v| v.kind) {
                Ok(ValueKind::Modifier(m)) => Ok(m),
                _ => Err(ConfigError::Invalid(format!(
                    "lockable_modifiers: '{}' is not a modifier",
                    name
                ))),
            })
            .collect()
    }
}
