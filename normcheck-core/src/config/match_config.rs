//! Matching configuration for the filtering engine.

use serde::{Deserialize, Serialize};

/// Tunables for entry filtering and progress counting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatchConfig {
    /// Field values treated as "not specified" (auto-pass). Matched
    /// case-insensitively after trimming.
    #[serde(default)]
    pub placeholder_values: Vec<String>,
    /// Column-type value marking a row as needing analyst review.
    /// Default: "Parameter".
    pub parameter_tag: Option<String>,
    /// Minimum shared words for multi-word usage labels. Default: 2.
    pub usage_overlap_threshold: Option<usize>,
}

impl MatchConfig {
    /// Placeholder values, falling back to the stock import placeholders.
    pub fn effective_placeholders(&self) -> Vec<String> {
        if self.placeholder_values.is_empty() {
            vec!["please select".to_string(), "bitte wählen".to_string()]
        } else {
            self.placeholder_values.clone()
        }
    }

    pub fn effective_parameter_tag(&self) -> &str {
        self.parameter_tag.as_deref().unwrap_or("Parameter")
    }

    pub fn effective_usage_overlap_threshold(&self) -> usize {
        self.usage_overlap_threshold.unwrap_or(2)
    }

    /// True if the trimmed value is blank or a recognized placeholder.
    pub fn is_unspecified(&self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return true;
        }
        let lowered = trimmed.to_lowercase();
        self.effective_placeholders()
            .iter()
            .any(|p| p.to_lowercase() == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_placeholder_are_unspecified() {
        let config = MatchConfig::default();
        assert!(config.is_unspecified(""));
        assert!(config.is_unspecified("   "));
        assert!(config.is_unspecified("Please select"));
        assert!(config.is_unspecified("  bitte wählen "));
        assert!(!config.is_unspecified("Light"));
    }

    #[test]
    fn custom_placeholders_replace_defaults() {
        let config = MatchConfig {
            placeholder_values: vec!["n/a".to_string()],
            ..Default::default()
        };
        assert!(config.is_unspecified("N/A"));
        assert!(!config.is_unspecified("please select"));
    }
}
