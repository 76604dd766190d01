//! Error types for the EstimAI client

use estimai_domain::{TransportError, ValidationError};
use thiserror::Error;

/// Errors building clients or writing artifacts
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors submitting an estimation request
///
/// Any of these aborts the flow before polling starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Input rejected locally, nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Service answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Reply body was not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reply carried no usable `id` or `request_id`
    #[error("Response contained no usable 'id' or 'request_id'")]
    MissingCorrelationId,
}

impl From<TransportError> for SubmissionError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Status(status) => SubmissionError::Status(status),
            TransportError::Network(msg) => SubmissionError::Network(msg),
            TransportError::InvalidResponse(msg) => SubmissionError::InvalidResponse(msg),
        }
    }
}

/// Errors from a spawned estimation flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Submission failed
    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    /// Flow was cancelled before reaching a terminal state
    #[error("Estimation flow cancelled")]
    Cancelled,

    /// Flow task panicked
    #[error("Estimation flow aborted: {0}")]
    Aborted(String),
}
