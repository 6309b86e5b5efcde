//! Configuration for evidence retrieval

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Where evidence comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Encyclopedia title search and page fetch
    #[default]
    #[serde(alias = "encyclopedic")]
    Wikipedia,
    /// Web search; served by the encyclopedic path
    Web,
    /// Vector index; served by the encyclopedic path
    Vector,
}

impl RetrievalMode {
    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalMode::Wikipedia => "wikipedia",
            RetrievalMode::Web => "web",
            RetrievalMode::Vector => "vector",
        }
    }

    /// Parse a configuration name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wikipedia" | "encyclopedic" => Some(RetrievalMode::Wikipedia),
            "web" => Some(RetrievalMode::Web),
            "vector" => Some(RetrievalMode::Vector),
            _ => None,
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Unknown retrieval mode '{}' (expected wikipedia, web or vector)", s)
        })
    }
}

/// Configuration for the evidence source and the Wikipedia client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Retrieval mode
    pub mode: RetrievalMode,

    /// Wikipedia language edition
    pub language: String,

    /// API endpoint override; defaults to the language edition's api.php
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// User-Agent sent to the API
    pub user_agent: String,

    /// Number of `.`-separated segments kept from each page
    pub sentence_limit: usize,

    /// Per-request HTTP timeout (seconds)
    pub request_timeout_secs: u64,

    /// Minimum delay between consecutive API requests (milliseconds)
    pub min_request_interval_ms: u64,
}

impl RetrievalConfig {
    /// Per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Minimum request spacing as a Duration
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    /// The API endpoint to use
    pub fn resolved_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}.wikipedia.org/w/api.php", self.language),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.language.trim().is_empty()
            || !self.language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(format!("language '{}' is not a valid language code", self.language));
        }
        if self.sentence_limit == 0 {
            return Err("sentence_limit must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
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

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::Wikipedia,
            language: "en".to_string(),
            endpoint: None,
            user_agent: concat!("truthlens/", env!("CARGO_PKG_VERSION")).to_string(),
            sentence_limit: 10,
            request_timeout_secs: 10,
            min_request_interval_ms: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RetrievalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sentence_limit, 10);
        assert_eq!(config.resolved_endpoint(), "https://en.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_endpoint_follows_language() {
        let config = RetrievalConfig {
            language: "de".to_string(),
            ..RetrievalConfig::default()
        };
        assert_eq!(config.resolved_endpoint(), "https://de.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_invalid_values() {
        let bad_lang = RetrievalConfig {
            language: "e n/".to_string(),
            ..RetrievalConfig::default()
        };
        assert!(bad_lang.validate().is_err());

        let no_sentences = RetrievalConfig {
            sentence_limit: 0,
            ..RetrievalConfig::default()
        };
        assert!(no_sentences.validate().is_err());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("Wikipedia".parse::<RetrievalMode>().unwrap(), RetrievalMode::Wikipedia);
        assert_eq!(RetrievalMode::parse("encyclopedic"), Some(RetrievalMode::Wikipedia));
        assert_eq!(RetrievalMode::parse("vector"), Some(RetrievalMode::Vector));
        assert!("faiss".parse::<RetrievalMode>().is_err());
    }

    #[test]
    fn test_toml_mode_is_lowercase() {
        let config = RetrievalConfig::from_toml("mode = \"web\"\nsentence_limit = 5").unwrap();
        assert_eq!(config.mode, RetrievalMode::Web);
        assert_eq!(config.sentence_limit, 5);

        let round_trip = RetrievalConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }
}
