//! Configuration for the EstimAI client

use std::time::Duration;

/// Environment variable holding the estimation service base URL
pub const ENV_API_URL: &str = "ESTIMAI_API_URL";

/// Environment variable holding the result storage base URL
pub const ENV_STORAGE_URL: &str = "ESTIMAI_STORAGE_URL";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ESTIMAI_API_KEY";

/// Timeout for a single HTTP request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoints and credentials for one estimation flow
///
/// Every field is optional. Without `api_url` requests are simulated
/// locally; without `storage_url` no result can be fetched and the
/// example dataset is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Estimation service base URL (`POST {api_url}/estimate`)
    pub api_url: Option<String>,

    /// Result storage base URL (`GET {storage_url}/{id}.json`)
    pub storage_url: Option<String>,

    /// Sent as `x-api-key` on every request
    pub api_key: Option<String>,
}

impl ClientConfig {
    /// Read configuration from `ESTIMAI_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup(ENV_API_URL),
            storage_url: lookup(ENV_STORAGE_URL),
            api_key: lookup(ENV_API_KEY),
        }
        .normalized()
    }

    /// Drop blank values and trailing slashes
    pub fn normalized(self) -> Self {
        Self {
            api_url: clean_url(self.api_url),
            storage_url: clean_url(self.storage_url),
            api_key: self.api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
        }
    }

    /// Overlay `other` on top of `self`; set fields in `other` win
    pub fn merge(self, other: ClientConfig) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            storage_url: other.storage_url.or(self.storage_url),
            api_key: other.api_key.or(self.api_key),
        }
        .normalized()
    }

    /// Whether submissions go to a real service
    pub fn is_remote(&self) -> bool {
        self.api_url.is_some()
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [("api_url", &self.api_url), ("storage_url", &self.storage_url)] {
            if let Some(url) = url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!("{} must start with http:// or https://, got '{}'", name, url));
                }
            }
        }
        Ok(())
    }
}

fn clean_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().trim_end_matches('/').to_string())
        .filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_is_simulated() {
        let config = ClientConfig::default();
        assert!(!config.is_remote());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://api.example.com/"),
            (ENV_STORAGE_URL, "https://bucket.s3.amazonaws.com"),
            (ENV_API_KEY, "secret"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.storage_url.as_deref(), Some("https://bucket.s3.amazonaws.com"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!(config.is_remote());
    }

    #[test]
    fn test_blank_values_are_absent() {
        let config = ClientConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_merge_prefers_override() {
        let base = ClientConfig {
            api_url: Some("http://a".into()),
            storage_url: Some("http://s".into()),
            api_key: None,
        };
        let overlay = ClientConfig {
            api_url: Some("http://b".into()),
            ..Default::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.api_url.as_deref(), Some("http://b"));
        assert_eq!(merged.storage_url.as_deref(), Some("http://s"));
    }

    #[test]
    fn test_invalid_scheme() {
        let config = ClientConfig {
            storage_url: Some("s3://bucket".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
