//! TruthLens LLM Provider Layer
//!
//! Pluggable text-generation and embedding backends.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` and
//! `EmbeddingProvider` traits from `truthlens-domain`. All providers are
//! blocking; the pipeline is synchronous per evaluation.
//!
//! # Providers
//!
//! - `MockProvider` / `MockEmbedder`: Deterministic mocks for testing
//! - `OpenAiProvider`: OpenAI chat completions and embeddings
//! - `AnthropicProvider`: Anthropic messages API
//! - `OllamaProvider`: Local Ollama API
//!
//! `LlmBackend` and `EmbeddingBackend` select one of these by name at
//! construction time.
//!
//! # Examples
//!
//! ```
//! use truthlens_llm::MockProvider;
//! use truthlens_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt", None).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod backend;
mod http;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod response;

use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use backend::{EmbeddingBackend, LlmBackend, ProviderKind};
pub use mock::{MockEmbedder, MockProvider};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use response::strip_code_fence;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Missing credentials or an unusable backend selection
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Input rejected before any call was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether this error means the backend can never work as configured
    pub fn is_config(&self) -> bool {
        matches!(self, LlmError::Config(_))
    }
}
