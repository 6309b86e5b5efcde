//! TruthLens Claim Scorer
//!
//! Judges one claim against its evidence and produces a
//! [`ClaimResult`](truthlens_domain::ClaimResult).
//!
//! # Strategies
//!
//! - **Model verification**: a language model reads the claim and the top
//!   snippets and answers with a JSON judgment. Any failure falls back,
//!   once, to embedding similarity.
//! - **Embedding similarity**: cosine similarity between the claim and
//!   each snippet, combined as `0.7 * max + 0.3 * mean`.
//!
//! A claim without evidence is always `no_evidence` with score 0.0 and
//! neither strategy runs.
//!
//! # Example Usage
//!
//! ```
//! use truthlens_domain::{Claim, ClaimVerdict, EvidenceSnippet};
//! use truthlens_llm::{MockEmbedder, MockProvider};
//! use truthlens_scorer::{ClaimScorer, ScorerConfig, ScoringStrategy};
//!
//! let llm = MockProvider::new(r#"{"supported": true, "confidence": 0.9, "reasoning": "ok", "contradiction": false}"#);
//! let scorer = ClaimScorer::new(
//!     ScoringStrategy::ModelVerification(llm),
//!     None::<MockEmbedder>,
//!     ScorerConfig::default(),
//! ).unwrap();
//!
//! let claim = Claim::new("Paris is the capital of France", "Geography");
//! let evidence = vec![EvidenceSnippet::new("Paris is the capital of France.", "Wikipedia: Paris")];
//! let result = scorer.score(&claim, &evidence);
//! assert_eq!(result.verdict, ClaimVerdict::Supported);
//! assert_eq!(result.score, 0.9);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod scorer;
mod similarity;
mod verification;

pub use config::ScorerConfig;
pub use error::ScorerError;
pub use scorer::{ClaimScorer, ScoringStrategy, NO_EVIDENCE_REASONING};
pub use similarity::{cosine_similarity, SimilarityScore};
pub use verification::{build_verification_prompt, parse_judgment, Judgment, SYSTEM_PROMPT};
