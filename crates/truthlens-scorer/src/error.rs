//! Error types for claim scoring

use thiserror::Error;

/// Errors raised while scoring a claim
#[derive(Error, Debug)]
pub enum ScorerError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The model's judgment could not be understood
    #[error("Invalid judgment: {0}")]
    InvalidJudgment(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The embedding backend failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Similarity scoring was needed but no embedding backend exists
    #[error("No embedding backend configured")]
    NoEmbedder,

    /// Claim and evidence vectors differ in length
    #[error("Embedding dimension mismatch: {expected} vs {found}")]
    DimensionMismatch {
        /// Length of the claim vector
        expected: usize,
        /// Length of the evidence vector
        found: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ScorerError {
    fn from(e: serde_json::Error) -> Self {
        ScorerError::JsonParse(e.to_string())
    }
}
