//! Trait definitions for external interactions
//!
//! These traits define the boundaries between pipeline logic and the
//! services it consumes. Infrastructure implementations live in other crates
//! (truthlens-llm, truthlens-retrieval); tests substitute deterministic mocks.

use std::fmt;
use std::sync::Arc;

/// Trait for text-generation backends
///
/// Implemented by the infrastructure layer (truthlens-llm)
pub trait LlmProvider {
    /// Error type for generation
    type Error;

    /// Generate a completion for `prompt`, optionally steered by a system prompt
    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error>;
}

/// Trait for embedding backends
///
/// Implemented by the infrastructure layer (truthlens-llm)
pub trait EmbeddingProvider {
    /// Error type for embedding
    type Error;

    /// Embed `text` as a dense vector
    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;
}

/// A page fetched from an encyclopedic source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncyclopediaPage {
    /// Resolved page title
    pub title: String,

    /// Plain-text page content
    pub content: String,

    /// Canonical page URL
    pub url: String,
}

/// Failure while fetching a single encyclopedia page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError<E> {
    /// The title resolves to several distinct topics
    Disambiguation {
        /// Requested title
        title: String,
        /// Candidate topics, when the source lists them
        options: Vec<String>,
    },

    /// No page exists under the title
    NotFound {
        /// Requested title
        title: String,
    },

    /// The service itself failed
    Service(E),
}

impl<E> LookupError<E> {
    /// Whether the evidence source should skip this candidate and continue
    pub fn is_skippable(&self) -> bool {
        matches!(self, LookupError::Disambiguation { .. } | LookupError::NotFound { .. })
    }
}

impl<E: fmt::Display> fmt::Display for LookupError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Disambiguation { title, options } if options.is_empty() => {
                write!(f, "'{}' is ambiguous", title)
            }
            LookupError::Disambiguation { title, options } => {
                write!(f, "'{}' is ambiguous (may refer to: {})", title, options.join(", "))
            }
            LookupError::NotFound { title } => write!(f, "page '{}' not found", title),
            LookupError::Service(e) => write!(f, "lookup service error: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for LookupError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Service(e) => Some(e),
            _ => None,
        }
    }
}

/// Trait for encyclopedic lookup services
///
/// Implemented by the infrastructure layer (truthlens-retrieval)
pub trait EncyclopediaLookup {
    /// Error type for service failures
    type Error;

    /// Search page titles matching `query`, best match first
    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, Self::Error>;

    /// Fetch the full page for `title`
    fn fetch(&self, title: &str) -> Result<EncyclopediaPage, LookupError<Self::Error>>;
}

impl<T: LlmProvider + ?Sized> LlmProvider for &T {
    type Error = T::Error;

    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error> {
        (**self).generate(prompt, system_prompt)
    }
}

impl<T: LlmProvider + ?Sized> LlmProvider for Arc<T> {
    type Error = T::Error;

    fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String, Self::Error> {
        (**self).generate(prompt, system_prompt)
    }
}

impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for &T {
    type Error = T::Error;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        (**self).embed(text)
    }
}

impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<T> {
    type Error = T::Error;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        (**self).embed(text)
    }
}

impl<T: EncyclopediaLookup + ?Sized> EncyclopediaLookup for &T {
    type Error = T::Error;

    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, Self::Error> {
        (**self).search(query, limit)
    }

    fn fetch(&self, title: &str) -> Result<EncyclopediaPage, LookupError<Self::Error>> {
        (**self).fetch(title)
    }
}

impl<T: EncyclopediaLookup + ?Sized> EncyclopediaLookup for Arc<T> {
    type Error = T::Error;

    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, Self::Error> {
        (**self).search(query, limit)
    }

    fn fetch(&self, title: &str) -> Result<EncyclopediaPage, LookupError<Self::Error>> {
        (**self).fetch(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skippable_lookup_errors() {
        let ambiguous: LookupError<String> = LookupError::Disambiguation {
            title: "Mercury".to_string(),
            options: vec!["Mercury (planet)".to_string(), "Mercury (element)".to_string()],
        };
        let missing: LookupError<String> = LookupError::NotFound { title: "Nope".to_string() };
        let failed: LookupError<String> = LookupError::Service("timeout".to_string());

        assert!(ambiguous.is_skippable());
        assert!(missing.is_skippable());
        assert!(!failed.is_skippable());
    }

    #[test]
    fn test_lookup_error_display() {
        let ambiguous: LookupError<String> = LookupError::Disambiguation {
            title: "Mercury".to_string(),
            options: vec!["Mercury (planet)".to_string()],
        };
        assert_eq!(
            ambiguous.to_string(),
            "'Mercury' is ambiguous (may refer to: Mercury (planet))"
        );
        let failed: LookupError<String> = LookupError::Service("timeout".to_string());
        assert_eq!(failed.to_string(), "lookup service error: timeout");
    }
}
