//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input length sent to the model (characters); longer text is truncated
    pub max_text_length: usize,

    /// Maximum claims produced by the degraded path
    pub fallback_max_claims: usize,

    /// Fragments must be strictly longer than this (characters) to become claims
    pub fallback_min_fragment_chars: usize,

    /// Context label attached to degraded-path claims
    pub fallback_context: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.fallback_max_claims == 0 {
            return Err("fallback_max_claims must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            fallback_max_claims: 10,
            fallback_min_fragment_chars: 10,
            fallback_context: "Extracted from text".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: shorter prompts and fewer fallback claims
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            fallback_max_claims: 5,
            ..Self::default()
        }
    }

    /// Lenient preset: longer prompts and more fallback claims
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            fallback_max_claims: 20,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fallback_max_claims, 10);
        assert_eq!(config.fallback_context, "Extracted from text");
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::aggressive().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("fallback_max_claims = 3").unwrap();
        assert_eq!(config.fallback_max_claims, 3);
        assert_eq!(config.max_text_length, 50_000);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let parsed = ExtractorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
