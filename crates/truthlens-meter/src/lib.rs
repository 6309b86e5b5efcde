//! TruthLens Hallucination Meter
//!
//! Wires claim extraction, evidence retrieval, claim scoring and
//! aggregation into the two public operations:
//!
//! - [`HallucinationMeter::evaluate`]: score a block of text
//! - [`HallucinationMeter::evaluate_query`]: generate an answer to a
//!   question, then score the answer
//!
//! # Architecture
//!
//! ```text
//! text → ClaimExtractor → claims
//!        for each claim: EvidenceSource → evidence → ClaimScorer → ClaimResult
//!        ClaimResults → aggregate → EvaluationResult
//! ```
//!
//! # Example Usage
//!
//! ```
//! use truthlens_domain::OverallVerdict;
//! use truthlens_llm::{MockEmbedder, MockProvider};
//! use truthlens_meter::{HallucinationMeter, MeterConfig};
//! use truthlens_retrieval::MockLookup;
//!
//! let llm = MockProvider::new("[]");
//! let meter = HallucinationMeter::new(
//!     llm,
//!     MockLookup::new(),
//!     None::<MockEmbedder>,
//!     MeterConfig::default(),
//! ).unwrap();
//!
//! let result = meter.evaluate("Nothing factual here");
//! assert_eq!(result.verdict, OverallVerdict::NoClaims);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod meter;

pub use config::MeterConfig;
pub use error::MeterError;
pub use meter::HallucinationMeter;
