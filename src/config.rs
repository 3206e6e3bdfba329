//! Engine configuration
//!
//! Tunables for the simulator and the case generator. Every field has a
//! default, so an absent file means the defaults; a file only needs the
//! fields it changes. Unknown fields are rejected.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Default margin behind the injury marker for positional simulation.
pub const DEFAULT_POSITIONAL_MARGIN: f64 = 20.0;

/// Default number of abnormal muscles shown per case.
pub const DEFAULT_ABNORMAL_SAMPLE_SIZE: usize = 4;

/// Default number of normal muscles shown per case.
pub const DEFAULT_NORMAL_SAMPLE_SIZE: usize = 4;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EngineConfig {
    /// How far behind the injury marker (in diagram x units) a segment may
    /// end and still be highlighted by the positional fallback.
    pub positional_margin: f64,

    /// Abnormal muscles sampled per case.
    pub abnormal_sample_size: usize,

    /// Normal muscles sampled per case.
    pub normal_sample_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            positional_margin: DEFAULT_POSITIONAL_MARGIN,
            abnormal_sample_size: DEFAULT_ABNORMAL_SAMPLE_SIZE,
            normal_sample_size: DEFAULT_NORMAL_SAMPLE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the file cannot be read or parsed and
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_yaml(&raw).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        tracing::info!(path = %path.display(), ?config, "engine config loaded");
        Ok(config)
    }

    /// Parses and validates YAML text. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed YAML or unknown fields and
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
                path: "<inline>".into(),
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first field out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.positional_margin.is_finite() || self.positional_margin < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "positional_margin".to_string(),
                value: self.positional_margin.to_string(),
                expected: "a finite number >= 0".to_string(),
            });
        }
        if self.abnormal_sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "abnormal_sample_size".to_string(),
                value: "0".to_string(),
                expected: "at least 1".to_string(),
            });
        }
        if self.normal_sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "normal_sample_size".to_string(),
                value: "0".to_string(),
                expected: "at least 1".to_string(),
            });
        }
        Ok(())
    }
}
