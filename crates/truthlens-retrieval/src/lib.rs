//! TruthLens Evidence Retrieval
//!
//! Finds independent evidence for a claim and provides embeddings for
//! similarity scoring.
//!
//! # Overview
//!
//! [`EvidenceSource`] runs the encyclopedic retrieval algorithm against any
//! [`EncyclopediaLookup`](truthlens_domain::traits::EncyclopediaLookup)
//! backend. [`WikipediaClient`] is the production backend; [`MockLookup`]
//! serves canned pages in tests.
//!
//! # Retrieval modes
//!
//! - `wikipedia`: encyclopedic title search plus page fetch
//! - `web`, `vector`: accepted for configuration compatibility and served
//!   by the encyclopedic path
//!
//! # Example Usage
//!
//! ```
//! use truthlens_retrieval::{EvidenceSource, MockLookup, RetrievalConfig};
//! use truthlens_llm::MockEmbedder;
//!
//! let mut lookup = MockLookup::new();
//! lookup.add_page("Paris", "Paris is the capital of France. It is large.", "https://en.wikipedia.org/wiki/Paris");
//!
//! let source = EvidenceSource::new(lookup, None::<MockEmbedder>, RetrievalConfig::default());
//! let evidence = source.retrieve("capital of France", 3);
//! assert_eq!(evidence[0].source, "Wikipedia: Paris");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod mock;
mod source;
mod wikipedia;

pub use config::{RetrievalConfig, RetrievalMode};
pub use error::RetrievalError;
pub use mock::MockLookup;
pub use source::{evidence_text, EvidenceSource};
pub use wikipedia::WikipediaClient;
