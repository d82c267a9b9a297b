//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ColumnConfig, MatchConfig};
use crate::errors::ConfigError;

/// Root configuration for the rule analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NormcheckConfig {
    pub columns: ColumnConfig,
    pub matching: MatchConfig,
}

impl NormcheckConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Load configuration from a TOML file. A missing file yields the
    /// defaults; a present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = NormcheckConfig::from_toml_str("").unwrap();
        assert_eq!(config.columns.effective_usage(), "usage");
        assert_eq!(config.matching.effective_parameter_tag(), "Parameter");
        assert_eq!(config.matching.effective_usage_overlap_threshold(), 2);
    }

    #[test]
    fn sections_override_defaults() {
        let config = NormcheckConfig::from_toml_str(
            r#"
            [columns]
            usage = "Nutzung"
            outline = "Gliederung"

            [matching]
            parameter_tag = "Kennwert"
            placeholder_values = ["bitte wählen"]
            "#,
        )
        .unwrap();
        assert_eq!(config.columns.effective_usage(), "Nutzung");
        assert_eq!(config.columns.effective_outline(), "Gliederung");
        assert_eq!(config.matching.effective_parameter_tag(), "Kennwert");
        assert!(config.matching.is_unspecified("Bitte wählen"));
    }
}
