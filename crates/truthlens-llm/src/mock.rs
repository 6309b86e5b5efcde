//! Deterministic test doubles
//!
//! `MockProvider` returns pre-configured completions and `MockEmbedder`
//! produces hash-based embeddings. Neither makes network calls. Both count
//! calls so tests can assert which services a pipeline touched.

use crate::LlmError;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use truthlens_domain::traits::{EmbeddingProvider, LlmProvider};

/// Sentinel response that makes the mock fail instead of answering
const ERROR_SENTINEL: &str = "ERROR";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct MockState {
    exact: HashMap<String, String>,
    containing: Vec<(String, String)>,
    calls: Vec<RecordedCall>,
}

/// A prompt received by [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// User prompt
    pub prompt: String,
    /// System prompt, if any
    pub system_prompt: Option<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Responses are chosen in this order: an exact prompt match, then the
/// first registered fragment contained in the prompt, then the default
/// response.
///
/// # Examples
///
/// ```
/// use truthlens_llm::MockProvider;
/// use truthlens_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt", None).unwrap(), "Fixed response");
///
/// // Prompt-specific responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response_containing("Claim:", r#"{"supported": true}"#);
/// assert_eq!(provider.generate("prompt1", None).unwrap(), "response1");
/// assert_eq!(provider.generate("Claim: x", None).unwrap(), r#"{"supported": true}"#);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Add a specific response for an exact prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.state).exact.insert(prompt.into(), response.into());
    }

    /// Add a response for any prompt containing `fragment`
    pub fn add_response_containing(
        &mut self,
        fragment: impl Into<String>,
        response: impl Into<String>,
    ) {
        lock(&self.state)
            .containing
            .push((fragment.into(), response.into()));
    }

    /// Configure to return an error for an exact prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.add_response(prompt, ERROR_SENTINEL);
    }

    /// Configure to return an error for any prompt containing `fragment`
    pub fn add_error_containing(&mut self, fragment: impl Into<String>) {
        self.add_response_containing(fragment, ERROR_SENTINEL);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.state).calls.len()
    }

    /// Every prompt received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.state).calls.clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        lock(&self.state).calls.clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error> {
        let mut state = lock(&self.state);
        state.calls.push(RecordedCall {
            prompt: prompt.to_string(),
            system_prompt: system_prompt.map(str::to_string),
        });

        let response = state
            .exact
            .get(prompt)
            .or_else(|| {
                state
                    .containing
                    .iter()
                    .find(|(fragment, _)| prompt.contains(fragment.as_str()))
                    .map(|(_, response)| response)
            })
            .unwrap_or(&self.default_response);

        if response == ERROR_SENTINEL {
            return Err(LlmError::Other("Mock error".to_string()));
        }
        Ok(response.clone())
    }
}

/// Mock embedding model for testing
///
/// Generates deterministic embeddings from a hash of the input text. The
/// embeddings are:
///
/// - **Deterministic**: Same text always produces same embedding
/// - **Normalized**: All vectors have unit length
/// - **Diverse**: Different texts produce different embeddings
///
/// Specific texts can be pinned to fixed vectors to make similarity
/// scores predictable.
///
/// # Examples
///
/// ```
/// use truthlens_llm::MockEmbedder;
/// use truthlens_domain::traits::EmbeddingProvider;
///
/// let model = MockEmbedder::new(384);
/// let embedding = model.embed("The sky is blue").unwrap();
/// assert_eq!(embedding.len(), 384);
/// assert_eq!(embedding, model.embed("The sky is blue").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimension: usize,
    pinned: Arc<Mutex<HashMap<String, Vec<f32>>>>,
    failing: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockEmbedder {
    /// Create a new mock embedder producing `dimension`-sized vectors
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            pinned: Arc::new(Mutex::new(HashMap::new())),
            failing: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// An embedder whose every call fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(0)
        }
    }

    /// Pin `text` to a fixed vector
    pub fn pin(&mut self, text: impl Into<String>, vector: Vec<f32>) {
        lock(&self.pinned).insert(text.into(), vector);
    }

    /// Get the number of times embed was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Get the dimension of unpinned embeddings
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Hash text with a seed to get a deterministic value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

impl EmbeddingProvider for MockEmbedder {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        *lock(&self.call_count) += 1;

        if self.failing {
            return Err(LlmError::Communication("Mock embedder unavailable".to_string()));
        }
        if let Some(vector) = lock(&self.pinned).get(text) {
            return Ok(vector.clone());
        }
        if text.is_empty() {
            return Err(LlmError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding: Vec<f32> = (0..self.dimension)
            .map(|i| Self::hash_with_seed(text, i as u64))
            .collect();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }
}
