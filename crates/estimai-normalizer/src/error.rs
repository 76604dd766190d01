//! Recoverable normalization failures

use thiserror::Error;

/// Why an embedded result could not be promoted
///
/// Never surfaced to callers of [`crate::normalize`]; only logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationFailure {
    /// Text field holds no ```` ```json ```` fenced block
    #[error("No fenced JSON block in refined_requirements")]
    MissingBlock,

    /// Fenced block found but its content is not valid JSON
    #[error("Embedded JSON parse error: {0}")]
    MalformedJson(String),
}

impl From<serde_json::Error> for NormalizationFailure {
    fn from(e: serde_json::Error) -> Self {
        NormalizationFailure::MalformedJson(e.to_string())
    }
}
