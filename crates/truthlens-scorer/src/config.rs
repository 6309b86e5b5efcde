//! Configuration for the Claim Scorer

use serde::{Deserialize, Serialize};
use truthlens_domain::ClaimVerdict;

/// Configuration for the Claim Scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Snippets included in the verification prompt
    pub max_evidence_in_prompt: usize,

    /// Score for a claim the model neither supports nor contradicts
    pub unsupported_score: f64,

    /// Confidence assumed when the model omits it
    pub default_confidence: f64,

    /// Weight of the best snippet similarity
    pub max_similarity_weight: f64,

    /// Weight of the mean snippet similarity
    pub mean_similarity_weight: f64,

    /// Similarity score at or above which a claim is `supported`
    pub supported_threshold: f64,

    /// Similarity score at or above which a claim is `uncertain`
    pub uncertain_threshold: f64,

    /// Similarity score at or above which a claim is `weak_support`
    pub weak_support_threshold: f64,
}

impl ScorerConfig {
    /// Verdict for a combined similarity score
    pub fn similarity_verdict(&self, score: f64) -> ClaimVerdict {
        if score >= self.supported_threshold {
            ClaimVerdict::Supported
        } else if score >= self.uncertain_threshold {
            ClaimVerdict::Uncertain
        } else if score >= self.weak_support_threshold {
            ClaimVerdict::WeakSupport
        } else {
            ClaimVerdict::Contradicted
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evidence_in_prompt == 0 {
            return Err("max_evidence_in_prompt must be greater than 0".to_string());
        }
        for (name, value) in [
            ("unsupported_score", self.unsupported_score),
            ("default_confidence", self.default_confidence),
            ("max_similarity_weight", self.max_similarity_weight),
            ("mean_similarity_weight", self.mean_similarity_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be in [0.0, 1.0], got {}", name, value));
            }
        }
        if !(self.supported_threshold >= self.uncertain_threshold
            && self.uncertain_threshold >= self.weak_support_threshold)
        {
            return Err("similarity thresholds must be non-increasing".to_string());
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

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            max_evidence_in_prompt: 3,
            unsupported_score: 0.3,
            default_confidence: 0.5,
            max_similarity_weight: 0.7,
            mean_similarity_weight: 0.3,
            supported_threshold: 0.75,
            uncertain_threshold: 0.55,
            weak_support_threshold: 0.35,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_similarity_verdict_boundaries() {
        let config = ScorerConfig::default();
        assert_eq!(config.similarity_verdict(0.75), ClaimVerdict::Supported);
        assert_eq!(config.similarity_verdict(0.7499), ClaimVerdict::Uncertain);
        assert_eq!(config.similarity_verdict(0.55), ClaimVerdict::Uncertain);
        assert_eq!(config.similarity_verdict(0.35), ClaimVerdict::WeakSupport);
        assert_eq!(config.similarity_verdict(0.3499), ClaimVerdict::Contradicted);
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let config = ScorerConfig {
            uncertain_threshold: 0.9,
            ..ScorerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let config = ScorerConfig {
            max_similarity_weight: 1.5,
            ..ScorerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ScorerConfig::from_toml("unsupported_score = 0.25").unwrap();
        assert_eq!(config.unsupported_score, 0.25);
        assert_eq!(ScorerConfig::from_toml(&config.to_toml().unwrap()).unwrap(), config);
    }
}
