//! Configuration for the document editor

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{is_void_tag, DEFAULT_TAG};
use crate::operations::{DEFAULT_CLASS_ID_LENGTH, DEFAULT_CLASS_PREFIX, DEFAULT_DROP_EDGE_RATIO};

/// Upper bound for generated class-name ids (a simple UUID has 32 hex chars)
const MAX_CLASS_ID_LENGTH: usize = 32;

/// Errors loading an editor configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Editor tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tag given to newly created elements
    pub default_tag: String,

    /// Prefix of generated class names
    pub class_prefix: String,

    /// Random hex characters in generated class names
    pub class_id_length: usize,

    /// Share of a drop target's height treated as its before/after edge
    pub drop_edge_ratio: f64,

    /// Buffered events per subscriber before lagging ones miss events
    pub event_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            class_id_length: DEFAULT_CLASS_ID_LENGTH,
            drop_edge_ratio: DEFAULT_DROP_EDGE_RATIO,
            event_capacity: 128,
        }
    }
}

impl EditorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_tag.trim().is_empty() {
            return Err("default_tag cannot be empty".to_string());
        }

        if is_void_tag(&self.default_tag) {
            return Err(format!(
                "default_tag '{}' is a void element and could never hold children",
                self.default_tag
            ));
        }

        if self.class_id_length == 0 || self.class_id_length > MAX_CLASS_ID_LENGTH {
            return Err(format!(
                "class_id_length must be between 1 and {}",
                MAX_CLASS_ID_LENGTH
            ));
        }

        if !(0.0..=0.5).contains(&self.drop_edge_ratio) {
            return Err("drop_edge_ratio must be between 0.0 and 0.5".to_string());
        }

        if self.event_capacity == 0 {
            return Err("event_capacity must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.default_tag, "div");
        assert_eq!(config.class_prefix, "mx-");
        assert_eq!(config.class_id_length, 6);
        assert_eq!(config.drop_edge_ratio, 0.25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EditorConfig::default();

        config.default_tag = "img".to_string();
        assert!(config.validate().is_err());

        config = EditorConfig::default();
        config.class_id_length = 0;
        assert!(config.validate().is_err());

        config = EditorConfig::default();
        config.drop_edge_ratio = 0.75;
        assert!(config.validate().is_err());

        config = EditorConfig::default();
        config.event_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "class_prefix": "ui-" }"#).unwrap();
        assert_eq!(config.class_prefix, "ui-");
        assert_eq!(config.default_tag, "div");
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let err = EditorConfig::from_json_str(r#"{ "drop_edge_ratio": 2.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EditorConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_tag": "section", "event_capacity": 8 }}"#).unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.default_tag, "section");
        assert_eq!(config.event_capacity, 8);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
