//! OpenAI provider
//!
//! Chat completions for generation and the embeddings endpoint for
//! vectors. The API key is read from `OPENAI_API_KEY` unless given
//! explicitly.

use crate::http::{build_client, send_json};
use crate::LlmError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use truthlens_domain::traits::{EmbeddingProvider, LlmProvider};

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Sampling temperature for chat completions
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI chat and embedding client
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    /// Create a provider with an explicit API key
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("OpenAI API key is empty".to_string()));
        }
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: 1,
        })
    }

    /// Create a provider using the key in `OPENAI_API_KEY`
    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| LlmError::Config(format!("{} is not set", API_KEY_ENV)))?;
        Self::new(api_key, model)
    }

    /// Point the client at a compatible API
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Model name sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_request<'a>(&'a self, prompt: &'a str, system_prompt: Option<&'a str>) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage { role: "system", content: system });
        }
        messages.push(ChatMessage { role: "user", content: prompt });
        ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        }
    }
}

impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = self.chat_request(prompt, system_prompt);

        tracing::debug!(model = %self.model, "openai chat completion");
        let response: ChatResponse = send_json(
            || self.client.post(&url).bearer_auth(&self.api_key).json(&body),
            self.max_retries,
            &self.model,
        )?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("No completion choices returned".to_string()))
    }
}

impl EmbeddingProvider for OpenAiProvider {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        let url = format!("{}/embeddings", self.endpoint);
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response: EmbeddingResponse = send_json(
            || self.client.post(&url).bearer_auth(&self.api_key).json(&body),
            self.max_retries,
            &self.model,
        )?;

        response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| LlmError::InvalidResponse("No embedding returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_config_error() {
        let result = OpenAiProvider::new("  ", DEFAULT_MODEL);
        assert!(result.unwrap_err().is_config());
    }

    #[test]
    fn test_chat_request_shape() {
        let provider = OpenAiProvider::new("sk-test", DEFAULT_MODEL).unwrap();
        let body = serde_json::to_value(provider.chat_request("question", Some("be brief"))).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "question");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_chat_request_without_system_prompt() {
        let provider = OpenAiProvider::new("sk-test", DEFAULT_MODEL).unwrap();
        let body = serde_json::to_value(provider.chat_request("question", None)).unwrap();
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "Paris"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("Paris"));
    }

    #[test]
    #[ignore] // Requires OPENAI_API_KEY and network access
    fn test_openai_generate_integration() {
        let provider = OpenAiProvider::from_env(DEFAULT_MODEL).unwrap();
        let response = provider.generate("Say 'hello' and nothing else", None).unwrap();
        assert!(!response.is_empty());
    }
}
