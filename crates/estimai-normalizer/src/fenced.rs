//! Locate markdown-fenced JSON inside free text

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// ```` ```json ````, newline, shortest content, newline, closing fence
static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\n(.*?)\n```").unwrap());

/// Content of the first ```` ```json ```` block, without the fences
///
/// The opening fence must be followed directly by a newline and the closing
/// fence must start on its own line.
pub fn fenced_block(text: &str) -> Option<&str> {
    FENCED_JSON
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse the first fenced JSON block in `text`
///
/// Returns `None` when there is no block or its content does not parse.
///
/// # Examples
///
/// ```
/// use estimai_normalizer::extract_fenced_json;
/// use serde_json::json;
///
/// let text = "prefix ```json\n{\"tasks\":[]}\n``` suffix";
/// assert_eq!(extract_fenced_json(text), Some(json!({"tasks": []})));
/// assert_eq!(extract_fenced_json("```json\n{invalid\n```"), None);
/// ```
pub fn extract_fenced_json(text: &str) -> Option<Value> {
    fenced_block(text).and_then(|block| serde_json::from_str(block).ok())
}
