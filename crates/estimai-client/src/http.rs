//! Shared reqwest client construction

use crate::config::ClientConfig;
use crate::error::ClientError;
use reqwest::header::{HeaderMap, HeaderValue};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Build an HTTP client with the configured timeout and API key header
pub(crate) fn build_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    let mut headers = HeaderMap::new();
    if let Some(key) = &config.api_key {
        let value = HeaderValue::from_str(key)
            .map_err(|e| ClientError::Config(format!("Invalid API key: {}", e)))?;
        headers.insert(API_KEY_HEADER, value);
    }

    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .default_headers(headers)
        .build()
        .map_err(|e| ClientError::Http(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_key() {
        assert!(build_client(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_unprintable_key() {
        let config = ClientConfig {
            api_key: Some("bad\nkey".into()),
            ..Default::default()
        };
        assert!(matches!(build_client(&config), Err(ClientError::Config(_))));
    }
}
