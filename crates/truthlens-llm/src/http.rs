//! Shared request plumbing for the HTTP-backed providers

use crate::LlmError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build a blocking client with a request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Send a request built by `build`, retrying transient failures
///
/// Rate limiting, missing models and unparseable bodies are returned
/// immediately. Other failures are retried up to `max_attempts` times with
/// exponential backoff (1s, 2s, 4s, ...).
pub(crate) fn send_json<T, F>(build: F, max_attempts: u32, model: &str) -> Result<T, LlmError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let attempts_allowed = max_attempts.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < attempts_allowed {
        match build().send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.json::<T>().map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                    });
                }
                match status {
                    StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimitExceeded),
                    StatusCode::NOT_FOUND => {
                        return Err(LlmError::ModelNotAvailable(model.to_string()))
                    }
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        return Err(LlmError::Config(format!(
                            "HTTP {}: credentials rejected",
                            status
                        )))
                    }
                    _ => {
                        let error_text = response
                            .text()
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < attempts_allowed {
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            tracing::debug!(attempt = attempts, ?delay, "retrying model request");
            std::thread::sleep(delay);
        }
    }

    Err(last_error
        .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}
