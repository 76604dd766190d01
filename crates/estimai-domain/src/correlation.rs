//! Correlation identifiers linking a submission to its result object

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Prefix used for locally synthesized identifiers
pub const SYNTHETIC_PREFIX: &str = "estim_";

/// Opaque identifier for one estimation job
///
/// Produced once, either by the estimation service or synthesized locally,
/// and never mutated afterwards. It is the only key used to locate the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Wrap an identifier received from elsewhere (service response, CLI argument)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Validate an identifier supplied by a user
    ///
    /// The id becomes part of a URL path and a file name, so only ASCII
    /// letters, digits, `.`, `_` and `-` are accepted.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let id = id.trim();
        if is_safe(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(ValidationError::InvalidCorrelationId(id.to_string()))
        }
    }

    /// Synthesize a locally unique identifier
    ///
    /// Uses a UUIDv7 so synthesized ids sort by creation time.
    ///
    /// # Examples
    ///
    /// ```
    /// use estimai_domain::CorrelationId;
    ///
    /// let id = CorrelationId::synthesize();
    /// assert!(id.as_str().starts_with("estim_"));
    /// ```
    pub fn synthesize() -> Self {
        Self(format!("{}{}", SYNTHETIC_PREFIX, uuid::Uuid::now_v7().simple()))
    }

    /// Extract the identifier from a submission response body
    ///
    /// Looks at `id` then `request_id`; the first usable value wins.
    /// Numeric ids are accepted and rendered as strings. Values that fail
    /// [`CorrelationId::parse`] are skipped.
    pub fn from_response(body: &Value) -> Option<Self> {
        ["id", "request_id"]
            .iter()
            .filter_map(|field| body.get(*field))
            .find_map(|value| match value {
                Value::String(s) => Self::parse(s).ok(),
                Value::Number(n) => Self::parse(&n.to_string()).ok(),
                _ => None,
            })
    }

    /// Object key of the result document in storage
    pub fn object_key(&self) -> String {
        format!("{}.json", self.0)
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id was synthesized locally rather than issued by the service
    pub fn is_synthetic(&self) -> bool {
        self.0.starts_with(SYNTHETIC_PREFIX)
    }
}

fn is_safe(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_prefers_id() {
        let body = json!({"id": "abc", "request_id": "def"});
        assert_eq!(CorrelationId::from_response(&body).unwrap().as_str(), "abc");
    }

    #[test]
    fn test_from_response_falls_back_to_request_id() {
        let body = json!({"request_id": "req-42"});
        assert_eq!(CorrelationId::from_response(&body).unwrap().as_str(), "req-42");
    }

    #[test]
    fn test_from_response_skips_empty_id() {
        let body = json!({"id": "", "request_id": "req-7"});
        assert_eq!(CorrelationId::from_response(&body).unwrap().as_str(), "req-7");
    }

    #[test]
    fn test_from_response_accepts_numbers() {
        let body = json!({"id": 1234});
        assert_eq!(CorrelationId::from_response(&body).unwrap().as_str(), "1234");
    }

    #[test]
    fn test_from_response_missing() {
        assert!(CorrelationId::from_response(&json!({"status": "queued"})).is_none());
        assert!(CorrelationId::from_response(&json!({"id": null})).is_none());
    }

    #[test]
    fn test_parse_accepts_service_ids() {
        assert_eq!(CorrelationId::parse(" job-1.v2_a ").unwrap().as_str(), "job-1.v2_a");
        assert!(CorrelationId::parse(CorrelationId::synthesize().as_str()).is_ok());
    }

    #[test]
    fn test_parse_rejects_path_and_query_characters() {
        for bad in ["", "  ", "a/b", "../secret", "id?x=1", "id#frag", "a b", "..", "ação"] {
            assert!(
                matches!(CorrelationId::parse(bad), Err(ValidationError::InvalidCorrelationId(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_from_response_skips_unsafe_id() {
        let body = json!({"id": "a/b", "request_id": "req-9"});
        assert_eq!(CorrelationId::from_response(&body).unwrap().as_str(), "req-9");
        assert!(CorrelationId::from_response(&json!({"id": "x?y"})).is_none());
    }

    #[test]
    fn test_object_key() {
        let id = CorrelationId::new("job-1");
        assert_eq!(id.object_key(), "job-1.json");
    }

    #[test]
    fn test_synthesized_ids_are_unique() {
        let a = CorrelationId::synthesize();
        let b = CorrelationId::synthesize();
        assert_ne!(a, b);
        assert!(a.is_synthetic());
        assert!(!CorrelationId::new("remote-id").is_synthetic());
    }
}
