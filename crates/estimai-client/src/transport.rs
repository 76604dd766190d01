//! Estimation transports
//!
//! [`HttpTransport`] talks to the real estimation service. [`SimulatedTransport`]
//! stands in when no service URL is configured so the flow can be demoed
//! end to end. [`transport_for`] picks one from configuration.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::build_client;
use async_trait::async_trait;
use estimai_domain::{CorrelationId, EstimationRequest, EstimationTransport, TransportError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Artificial latency of the simulated service (2 seconds)
pub const SIMULATED_LATENCY: Duration = Duration::from_secs(2);

/// Sends requests to `POST {base_url}/estimate`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the given service base URL
    pub fn new(base_url: impl Into<String>, config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(config)?,
        })
    }

    /// Full URL of the estimation endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/estimate", self.base_url)
    }
}

#[async_trait]
impl EstimationTransport for HttpTransport {
    async fn send(&self, request: &EstimationRequest) -> Result<Value, TransportError> {
        let url = self.endpoint();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Local stand-in for the estimation service
///
/// Waits [`SIMULATED_LATENCY`] and replies with a synthesized id.
/// Never touches the network.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport;

impl SimulatedTransport {
    /// Create a simulated transport
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EstimationTransport for SimulatedTransport {
    async fn send(&self, _request: &EstimationRequest) -> Result<Value, TransportError> {
        tokio::time::sleep(SIMULATED_LATENCY).await;
        let id = CorrelationId::synthesize();
        debug!("Simulated estimation request, id {}", id);
        Ok(json!({ "id": id }))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Pick the transport for a configuration
///
/// Remote when `api_url` is set, simulated otherwise.
pub fn transport_for(config: &ClientConfig) -> Result<Arc<dyn EstimationTransport>, ClientError> {
    match &config.api_url {
        Some(url) => Ok(Arc::new(HttpTransport::new(url.clone(), config)?)),
        None => Ok(Arc::new(SimulatedTransport::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:3000/", &ClientConfig::default()).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:3000/estimate");
    }

    #[test]
    fn test_transport_selection() {
        let remote = ClientConfig {
            api_url: Some("http://localhost:3000".into()),
            ..Default::default()
        };
        assert_eq!(transport_for(&remote).unwrap().name(), "http");
        assert_eq!(transport_for(&ClientConfig::default()).unwrap().name(), "simulated");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_waits_and_synthesizes() {
        let request = EstimationRequest::new("demo", "").unwrap();
        let start = Instant::now();

        let body = SimulatedTransport::new().send(&request).await.unwrap();

        assert!(start.elapsed() >= SIMULATED_LATENCY);
        let id = CorrelationId::from_response(&body).unwrap();
        assert!(id.is_synthetic());
    }
}
