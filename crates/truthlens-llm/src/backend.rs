//! Backend selection by name
//!
//! The CLI and config files name providers as strings. `ProviderKind`
//! parses those names and `LlmBackend` / `EmbeddingBackend` wrap the
//! concrete provider so the pipeline can stay generic over one type.

use crate::{
    anthropic, ollama, openai, AnthropicProvider, LlmError, MockEmbedder, MockProvider,
    OllamaProvider, OpenAiProvider,
};
use std::fmt;
use std::str::FromStr;
use truthlens_domain::traits::{EmbeddingProvider, LlmProvider};

/// Named model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI API
    OpenAi,
    /// Anthropic API
    Anthropic,
    /// Local Ollama server
    Ollama,
}

impl ProviderKind {
    /// All providers, in display order
    pub const ALL: [ProviderKind; 3] =
        [ProviderKind::OpenAi, ProviderKind::Anthropic, ProviderKind::Ollama];

    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
        }
    }

    /// Parse a configuration name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "anthropic" => Some(ProviderKind::Anthropic),
            "ollama" => Some(ProviderKind::Ollama),
            _ => None,
        }
    }

    /// Default generation model
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
            ProviderKind::Ollama => ollama::DEFAULT_MODEL,
        }
    }

    /// Default embedding model, if the provider offers embeddings
    pub fn default_embedding_model(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some(openai::DEFAULT_EMBEDDING_MODEL),
            ProviderKind::Anthropic => None,
            ProviderKind::Ollama => Some(ollama::DEFAULT_EMBEDDING_MODEL),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            LlmError::Config(format!(
                "Unknown provider '{}' (expected openai, anthropic or ollama)",
                s
            ))
        })
    }
}

/// A text-generation backend chosen at runtime
#[derive(Debug, Clone)]
pub enum LlmBackend {
    /// OpenAI chat completions
    OpenAi(OpenAiProvider),
    /// Anthropic messages
    Anthropic(AnthropicProvider),
    /// Local Ollama
    Ollama(OllamaProvider),
    /// Deterministic mock
    Mock(MockProvider),
}

impl LlmBackend {
    /// Build the backend for `kind`
    ///
    /// `model` falls back to the provider default. `endpoint` overrides the
    /// provider's base URL. API keys come from the environment.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Config` when a required API key is missing.
    pub fn from_env(
        kind: ProviderKind,
        model: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<Self, LlmError> {
        let model = model.unwrap_or_else(|| kind.default_model());
        let backend = match kind {
            ProviderKind::OpenAi => {
                let provider = OpenAiProvider::from_env(model)?;
                LlmBackend::OpenAi(match endpoint {
                    Some(endpoint) => provider.with_endpoint(endpoint),
                    None => provider,
                })
            }
            ProviderKind::Anthropic => {
                let provider = AnthropicProvider::from_env(model)?;
                LlmBackend::Anthropic(match endpoint {
                    Some(endpoint) => provider.with_endpoint(endpoint),
                    None => provider,
                })
            }
            ProviderKind::Ollama => LlmBackend::Ollama(OllamaProvider::new(
                endpoint.unwrap_or(ollama::DEFAULT_ENDPOINT),
                model,
            )?),
        };
        tracing::debug!(provider = %kind, model, "selected LLM backend");
        Ok(backend)
    }

    /// Short name of the wrapped provider
    pub fn name(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi(_) => "openai",
            LlmBackend::Anthropic(_) => "anthropic",
            LlmBackend::Ollama(_) => "ollama",
            LlmBackend::Mock(_) => "mock",
        }
    }
}

impl LlmProvider for LlmBackend {
    type Error = LlmError;

    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error> {
        match self {
            LlmBackend::OpenAi(p) => p.generate(prompt, system_prompt),
            LlmBackend::Anthropic(p) => p.generate(prompt, system_prompt),
            LlmBackend::Ollama(p) => p.generate(prompt, system_prompt),
            LlmBackend::Mock(p) => p.generate(prompt, system_prompt),
        }
    }
}

/// An embedding backend chosen at runtime
#[derive(Debug, Clone)]
pub enum EmbeddingBackend {
    /// OpenAI embeddings
    OpenAi(OpenAiProvider),
    /// Local Ollama embeddings
    Ollama(OllamaProvider),
    /// Deterministic mock
    Mock(MockEmbedder),
}

impl EmbeddingBackend {
    /// Build the embedding backend for `kind`
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Config` when the provider has no embedding API or
    /// a required API key is missing.
    pub fn from_env(
        kind: ProviderKind,
        model: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<Self, LlmError> {
        let model = match model.or_else(|| kind.default_embedding_model()) {
            Some(model) => model,
            None => {
                return Err(LlmError::Config(format!(
                    "Provider '{}' does not offer embeddings",
                    kind
                )))
            }
        };
        let backend = match kind {
            ProviderKind::OpenAi => {
                let provider = OpenAiProvider::from_env(model)?;
                EmbeddingBackend::OpenAi(match endpoint {
                    Some(endpoint) => provider.with_endpoint(endpoint),
                    None => provider,
                })
            }
            ProviderKind::Ollama => EmbeddingBackend::Ollama(OllamaProvider::new(
                endpoint.unwrap_or(ollama::DEFAULT_ENDPOINT),
                model,
            )?),
            ProviderKind::Anthropic => {
                return Err(LlmError::Config(
                    "Provider 'anthropic' does not offer embeddings".to_string(),
                ))
            }
        };
        tracing::debug!(provider = %kind, model, "selected embedding backend");
        Ok(backend)
    }
}

impl EmbeddingProvider for EmbeddingBackend {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        match self {
            EmbeddingBackend::OpenAi(p) => p.embed(text),
            EmbeddingBackend::Ollama(p) => p.embed(text),
            EmbeddingBackend::Mock(p) => p.embed(text),
        }
    }
}
