//! Error types for the CLI application.

use estimai_client::{ClientError, FlowError, SubmissionError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client setup or export error
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Submission rejected or failed
    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Estimation flow stopped
    #[error("Estimation failed: {0}")]
    Flow(#[from] FlowError),

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

    /// Interrupted by the user
    #[error("Cancelled")]
    Cancelled,
}
