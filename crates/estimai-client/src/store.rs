//! Result storage access

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::build_client;
use async_trait::async_trait;
use estimai_domain::{CorrelationId, FetchError, ResultStore};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Fetches `GET {base_url}/{id}.json` from an object store
#[derive(Debug, Clone)]
pub struct HttpResultStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpResultStore {
    /// Create a store reader for the given bucket URL
    pub fn new(base_url: impl Into<String>, config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(config)?,
        })
    }

    /// URL of the result object for `id`
    pub fn object_url(&self, id: &CorrelationId) -> String {
        format!("{}/{}", self.base_url, id.object_key())
    }
}

#[async_trait]
impl ResultStore for HttpResultStore {
    async fn fetch(&self, id: &CorrelationId) -> Result<Value, FetchError> {
        let url = self.object_url(id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

/// Store used when no storage URL is configured
///
/// Every fetch fails permanently, so the poller goes straight to the
/// example dataset instead of waiting out its budget.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl ResultStore for UnconfiguredStore {
    async fn fetch(&self, _id: &CorrelationId) -> Result<Value, FetchError> {
        Err(FetchError::Unavailable("no storage URL configured".to_string()))
    }
}

/// Pick the result store for a configuration
pub fn store_for(config: &ClientConfig) -> Result<Arc<dyn ResultStore>, ClientError> {
    match &config.storage_url {
        Some(url) => Ok(Arc::new(HttpResultStore::new(url.clone(), config)?)),
        None => Ok(Arc::new(UnconfiguredStore)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        let store = HttpResultStore::new("https://bucket.example.com/results/", &ClientConfig::default()).unwrap();
        let id = CorrelationId::new("abc-123");
        assert_eq!(store.object_url(&id), "https://bucket.example.com/results/abc-123.json");
    }

    #[tokio::test]
    async fn test_unconfigured_store_is_permanent_failure() {
        let err = UnconfiguredStore.fetch(&CorrelationId::new("x")).await.unwrap_err();
        assert!(!err.is_transient());
    }
}
