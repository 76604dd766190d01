//! Estimation request built from user input

use crate::error::ValidationError;
use serde::Serialize;

/// Requirements and optional context for one estimation job
///
/// Both fields are trimmed on construction. The value is immutable and
/// serializes to the `POST /estimate` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimationRequest {
    requirements: String,
    additional_info: String,
}

impl EstimationRequest {
    /// Build a request, rejecting empty requirements
    ///
    /// # Examples
    ///
    /// ```
    /// use estimai_domain::EstimationRequest;
    ///
    /// let request = EstimationRequest::new("  login page  ", "").unwrap();
    /// assert_eq!(request.requirements(), "login page");
    ///
    /// assert!(EstimationRequest::new("   ", "context").is_err());
    /// ```
    pub fn new(requirements: &str, additional_info: &str) -> Result<Self, ValidationError> {
        let requirements = requirements.trim();
        if requirements.is_empty() {
            return Err(ValidationError::EmptyRequirements);
        }

        Ok(Self {
            requirements: requirements.to_string(),
            additional_info: additional_info.trim().to_string(),
        })
    }

    /// Trimmed requirements text
    pub fn requirements(&self) -> &str {
        &self.requirements
    }

    /// Trimmed additional context (may be empty)
    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }
}
