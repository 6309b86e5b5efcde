//! Anthropic provider
//!
//! Text generation through the Messages API. Anthropic has no embedding
//! endpoint, so this provider only implements `LlmProvider`.

use crate::http::{build_client, send_json};
use crate::LlmError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use truthlens_domain::traits::LlmProvider;

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Default response length cap
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// API version header value
pub const API_VERSION: &str = "2023-06-01";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Anthropic Messages API client
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    client: Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicProvider {
    /// Create a provider with an explicit API key
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("Anthropic API key is empty".to_string()));
        }
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            max_tokens: DEFAULT_MAX_TOKENS,
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: 1,
        })
    }

    /// Create a provider using the key in `ANTHROPIC_API_KEY`
    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| LlmError::Config(format!("{} is not set", API_KEY_ENV)))?;
        Self::new(api_key, model)
    }

    /// Point the client at a different base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the response length cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
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

    fn messages_request<'a>(
        &'a self,
        prompt: &'a str,
        system_prompt: Option<&'a str>,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: system_prompt,
            messages: vec![Message { role: "user", content: prompt }],
        }
    }
}

impl LlmProvider for AnthropicProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error> {
        let url = format!("{}/messages", self.endpoint);
        let body = self.messages_request(prompt, system_prompt);

        tracing::debug!(model = %self.model, "anthropic messages request");
        let response: MessagesResponse = send_json(
            || {
                self.client
                    .post(&url)
                    .header("x-api-key", &self.api_key)
                    .header("anthropic-version", API_VERSION)
                    .json(&body)
            },
            self.max_retries,
            &self.model,
        )?;

        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();
        if text.is_empty() {
            return Err(LlmError::InvalidResponse("No text content returned".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_config_error() {
        assert!(AnthropicProvider::new("", DEFAULT_MODEL).unwrap_err().is_config());
    }

    #[test]
    fn test_messages_request_shape() {
        let provider = AnthropicProvider::new("key", DEFAULT_MODEL).unwrap();
        let body =
            serde_json::to_value(provider.messages_request("question", Some("be brief"))).unwrap();

        assert_eq!(body["model"], "claude-3-haiku-20240307");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["system"], "be brief");
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_text_blocks() {
        let raw = r#"{"content": [{"type": "text", "text": "Paris"}], "role": "assistant"}"#;
        let response: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.content[0].kind, "text");
        assert_eq!(response.content[0].text, "Paris");
    }

    #[test]
    #[ignore] // Requires ANTHROPIC_API_KEY and network access
    fn test_anthropic_generate_integration() {
        let provider = AnthropicProvider::from_env(DEFAULT_MODEL).unwrap();
        let response = provider.generate("Say 'hello' and nothing else", None).unwrap();
        assert!(!response.is_empty());
    }
}
