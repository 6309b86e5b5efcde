//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend could not be constructed
    #[error("Backend error: {0}")]
    Backend(#[from] truthlens_llm::LlmError),

    /// Evidence source could not be constructed
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] truthlens_retrieval::RetrievalError),

    /// Pipeline error
    #[error(transparent)]
    Meter(#[from] truthlens_meter::MeterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// Evaluation exceeded its time budget
    #[error("Evaluation timed out after {0}s")]
    Timeout(u64),

    /// The evaluation worker panicked or was cancelled
    #[error("Evaluation worker failed: {0}")]
    Worker(String),
}
