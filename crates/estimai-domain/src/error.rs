//! Error types crossing the domain trait seams

use thiserror::Error;

/// Input rejected before anything is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Requirements are empty or whitespace only
    #[error("Requirements must not be empty")]
    EmptyRequirements,

    /// Job id is empty or contains characters outside `[A-Za-z0-9._-]`
    #[error("Invalid job id: {0:?}")]
    InvalidCorrelationId(String),
}

/// Failure of an estimation transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Service answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Request never completed (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be read as JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure of a single result-object fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Object does not exist yet (404, or 403 from stores that hide missing keys)
    #[error("Result not ready (HTTP {0})")]
    NotReady(u16),

    /// Any other non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Object exists but its body is not JSON
    #[error("Malformed result document: {0}")]
    Malformed(String),

    /// No storage location to fetch from
    #[error("Result storage unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            403 | 404 => FetchError::NotReady(status),
            other => FetchError::Status(other),
        }
    }

    /// Whether another attempt may succeed
    ///
    /// Statuses and network faults are retried while budget remains.
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::Malformed(_) | FetchError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(FetchError::from_status(404), FetchError::NotReady(404));
        assert_eq!(FetchError::from_status(403), FetchError::NotReady(403));
        assert_eq!(FetchError::from_status(500), FetchError::Status(500));
        assert_eq!(FetchError::from_status(401), FetchError::Status(401));
    }

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::NotReady(404).is_transient());
        assert!(FetchError::Status(502).is_transient());
        assert!(FetchError::Network("dns".into()).is_transient());
        assert!(!FetchError::Malformed("eof".into()).is_transient());
        assert!(!FetchError::Unavailable("no url".into()).is_transient());
    }

    #[test]
    fn test_transport_status_message() {
        assert_eq!(TransportError::Status(500).to_string(), "HTTP error! status: 500");
    }
}
