//! TruthLens Domain Layer
//!
//! This crate contains the data model and pure decision logic shared by every
//! other TruthLens crate. It has ZERO external dependencies and defines the
//! value types, verdict tables, and capability traits that the pipeline
//! components are written against.
//!
//! ## Key Concepts
//!
//! - **Claim**: An atomic factual statement extracted from text
//! - **Evidence Snippet**: Retrieved text plus provenance, offered for or against a claim
//! - **Claim Result**: Score, verdict, and reasoning for one claim
//! - **Evaluation Result**: Aggregated truthfulness verdict for a whole text
//! - **Verdicts**: Closed label sets for claims and for whole evaluations
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure logic only (the Aggregator lives here)
//! - Service backends live in other crates and plug in through [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod claim;
pub mod evidence;
pub mod result;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use aggregate::{aggregate, Aggregate};
pub use claim::Claim;
pub use evidence::EvidenceSnippet;
pub use result::{ClaimResult, EvaluationResult};
pub use verdict::{ClaimVerdict, OverallVerdict, Tone};
