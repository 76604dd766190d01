//! Promote embedded JSON to the document's `result`

use crate::error::NormalizationFailure;
use crate::fenced::fenced_block;
use serde_json::Value;
use tracing::{debug, warn};

/// Normalize a fetched result document
///
/// - `result.refined_requirements` is a string containing a fenced JSON
///   block: the parsed block replaces the entire `result` field.
/// - Anything else (already structured, no block, malformed block): the
///   document is returned unchanged.
///
/// Other top-level fields are always preserved. Applying this to its own
/// output returns the same document.
pub fn normalize(document: Value) -> Value {
    match unwrap_embedded(&document) {
        Ok(Some(result)) => {
            debug!("Promoted embedded JSON block to result");
            let mut document = document;
            document["result"] = result;
            document
        }
        Ok(None) => document,
        Err(failure) => {
            warn!("Could not parse embedded JSON, leaving document unchanged: {}", failure);
            document
        }
    }
}

/// Find and parse the embedded result of a document
///
/// Returns `Ok(None)` when there is nothing to unwrap, i.e. the document has
/// no `result.refined_requirements` string.
pub fn unwrap_embedded(document: &Value) -> Result<Option<Value>, NormalizationFailure> {
    let text = match document
        .get("result")
        .and_then(|result| result.get("refined_requirements"))
        .and_then(Value::as_str)
    {
        Some(text) => text,
        None => return Ok(None),
    };

    let block = fenced_block(text).ok_or(NormalizationFailure::MissingBlock)?;
    let parsed: Value = serde_json::from_str(block)?;
    Ok(Some(parsed))
}
