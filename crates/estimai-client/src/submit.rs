//! Submission of estimation requests

use crate::config::ClientConfig;
use crate::error::{ClientError, SubmissionError};
use crate::transport::transport_for;
use estimai_domain::{CorrelationId, EstimationRequest, EstimationTransport};
use std::sync::Arc;
use tracing::{error, info};

/// Sends requirements to the estimation service and returns the job id
///
/// Exactly one transport call per valid submission; no retries.
#[derive(Clone)]
pub struct SubmissionClient {
    transport: Arc<dyn EstimationTransport>,
}

impl SubmissionClient {
    /// Create a client over an explicit transport
    pub fn new(transport: Arc<dyn EstimationTransport>) -> Self {
        Self { transport }
    }

    /// Create a client whose transport is chosen by configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(transport_for(config)?))
    }

    /// Name of the underlying transport
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Validate user input and submit it
    ///
    /// Blank requirements fail with a validation error before anything is sent.
    pub async fn submit(
        &self,
        requirements: &str,
        additional_info: &str,
    ) -> Result<CorrelationId, SubmissionError> {
        let request = EstimationRequest::new(requirements, additional_info)?;
        self.submit_request(&request).await
    }

    /// Submit an already validated request
    pub async fn submit_request(
        &self,
        request: &EstimationRequest,
    ) -> Result<CorrelationId, SubmissionError> {
        let body = self.transport.send(request).await.map_err(|e| {
            error!("Estimation request failed via {}: {}", self.transport.name(), e);
            SubmissionError::from(e)
        })?;

        let id = CorrelationId::from_response(&body).ok_or_else(|| {
            error!("Estimation response had no id: {}", body);
            SubmissionError::MissingCorrelationId
        })?;

        info!("Estimation request accepted via {}, id {}", self.transport.name(), id);
        Ok(id)
    }
}

impl std::fmt::Debug for SubmissionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionClient")
            .field("transport", &self.transport.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use estimai_domain::{TransportError, ValidationError};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Transport returning a canned reply and recording requests
    struct RecordingTransport {
        reply: Result<Value, TransportError>,
        sent: Mutex<Vec<EstimationRequest>>,
    }

    impl RecordingTransport {
        fn new(reply: Result<Value, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EstimationTransport for RecordingTransport {
        async fn send(&self, request: &EstimationRequest) -> Result<Value, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            self.reply.clone()
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_submit_returns_id() {
        let transport = RecordingTransport::new(Ok(json!({"id": "job-1"})));
        let client = SubmissionClient::new(transport.clone());

        let id = client.submit("  Build a CRM ", " 2 devs ").await.unwrap();

        assert_eq!(id.as_str(), "job-1");
        assert_eq!(transport.calls(), 1);
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].requirements(), "Build a CRM");
        assert_eq!(sent[0].additional_info(), "2 devs");
    }

    #[tokio::test]
    async fn test_blank_requirements_send_nothing() {
        let transport = RecordingTransport::new(Ok(json!({"id": "unused"})));
        let client = SubmissionClient::new(transport.clone());

        for blank in ["", "   ", "\n\t"] {
            let err = client.submit(blank, "info").await.unwrap_err();
            assert_eq!(err, SubmissionError::Validation(ValidationError::EmptyRequirements));
        }
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_status_error_is_surfaced() {
        let transport = RecordingTransport::new(Err(TransportError::Status(500)));
        let client = SubmissionClient::new(transport.clone());

        let err = client.submit("app", "").await.unwrap_err();
        assert_eq!(err, SubmissionError::Status(500));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_network_error_is_not_retried() {
        let transport = RecordingTransport::new(Err(TransportError::Network("refused".into())));
        let client = SubmissionClient::new(transport.clone());

        assert!(matches!(client.submit("app", "").await, Err(SubmissionError::Network(_))));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_id_is_an_error() {
        let transport = RecordingTransport::new(Ok(json!({"status": "queued"})));
        let client = SubmissionClient::new(transport);

        assert_eq!(
            client.submit("app", "").await.unwrap_err(),
            SubmissionError::MissingCorrelationId
        );
    }

    #[tokio::test]
    async fn test_id_unsafe_for_urls_is_rejected() {
        let transport = RecordingTransport::new(Ok(json!({"id": "../results/other"})));
        let client = SubmissionClient::new(transport);

        assert_eq!(
            client.submit("app", "").await.unwrap_err(),
            SubmissionError::MissingCorrelationId
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfigured_client_simulates() {
        let client = SubmissionClient::from_config(&ClientConfig::default()).unwrap();
        assert_eq!(client.transport_name(), "simulated");

        let id = client.submit("demo", "").await.unwrap();
        assert!(id.is_synthetic());
    }
}
