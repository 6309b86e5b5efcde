//! TruthLens Extractor
//!
//! Decomposes free text into atomic, independently verifiable factual
//! claims.
//!
//! # Overview
//!
//! The extractor asks a language model for a JSON array of
//! `{claim, context}` records. When the model fails or answers with
//! something other than an array of objects, a deterministic sentence
//! splitter takes over so that evaluation can still proceed.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → LLM → parser → Claims
//!                          ↘ (failure) → fallback_extract → Claims
//! ```
//!
//! # Example Usage
//!
//! ```
//! use truthlens_extractor::{ClaimExtractor, ExtractorConfig};
//! use truthlens_llm::MockProvider;
//!
//! let llm = MockProvider::new(
//!     r#"[{"claim": "Paris is the capital of France", "context": "Geography"}]"#,
//! );
//! let extractor = ClaimExtractor::new(llm, ExtractorConfig::default());
//!
//! let claims = extractor.extract("The capital of France is Paris.");
//! assert_eq!(claims.len(), 1);
//! assert_eq!(claims[0].context, "Geography");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::ClaimExtractor;
pub use parser::parse_llm_response;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
