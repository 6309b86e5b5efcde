//! Error types for the Hallucination Meter

use thiserror::Error;

/// Errors that abort a meter operation
#[derive(Error, Debug)]
pub enum MeterError {
    /// Invalid configuration or missing backend, raised at construction
    #[error("Configuration error: {0}")]
    Config(String),

    /// The language model could not produce an answer to evaluate
    #[error("Generation failed: {0}")]
    Generation(String),
}
