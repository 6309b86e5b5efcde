//! Error types for evidence retrieval

use thiserror::Error;

/// Errors raised by retrieval backends and the embedding passthrough
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Missing backend or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or API communication error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response from the lookup service could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The embedding backend failed
    #[error("Embedding error: {0}")]
    Embedding(String),
}

impl From<reqwest::Error> for RetrievalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RetrievalError::InvalidResponse(e.to_string())
        } else {
            RetrievalError::Http(e.to_string())
        }
    }
}
