//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in `estimai-client`.

use crate::{CorrelationId, EstimationRequest, FetchError, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// Sends an estimation request and returns the service's reply body
///
/// Implemented by the remote HTTP transport and by the local simulation
/// used when no service is configured.
#[async_trait]
pub trait EstimationTransport: Send + Sync {
    /// Deliver one request; the reply must carry `id` or `request_id`
    async fn send(&self, request: &EstimationRequest) -> Result<Value, TransportError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Fetches the result document stored under a correlation id
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Perform a single fetch of `{id}.json`
    async fn fetch(&self, id: &CorrelationId) -> Result<Value, FetchError>;
}
