//! Configuration for the Hallucination Meter

use serde::{Deserialize, Serialize};
use truthlens_extractor::ExtractorConfig;
use truthlens_retrieval::RetrievalConfig;
use truthlens_scorer::ScorerConfig;

/// Configuration for the whole pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Judge claims with the language model (otherwise embedding similarity)
    pub use_llm_verification: bool,

    /// Evidence snippets retrieved per claim
    pub evidence_per_claim: usize,

    /// Threads for the per-claim retrieve-then-score loop; 1 runs inline
    pub claim_workers: usize,

    /// Claim extraction settings
    pub extractor: ExtractorConfig,

    /// Evidence retrieval settings
    pub retrieval: RetrievalConfig,

    /// Claim scoring settings
    pub scorer: ScorerConfig,
}

impl MeterConfig {
    /// Validate this configuration and every sub-configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.evidence_per_claim == 0 {
            return Err("evidence_per_claim must be greater than 0".to_string());
        }
        if self.claim_workers == 0 {
            return Err("claim_workers must be greater than 0".to_string());
        }
        self.extractor
            .validate()
            .map_err(|e| format!("extractor: {}", e))?;
        self.retrieval
            .validate()
            .map_err(|e| format!("retrieval: {}", e))?;
        self.scorer.validate().map_err(|e| format!("scorer: {}", e))?;
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

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            use_llm_verification: true,
            evidence_per_claim: 3,
            claim_workers: 1,
            extractor: ExtractorConfig::default(),
            retrieval: RetrievalConfig::default(),
            scorer: ScorerConfig::default(),
        }
    }
}
