//! EstimAI Payload Normalizer
//!
//! Turns a fetched result document into the single shape renderers expect.
//!
//! The estimation service sometimes stores its answer as prose in
//! `result.refined_requirements`, with the real structure inside a
//! markdown-fenced JSON block. This crate finds that block and promotes it
//! to be the whole `result`. Anything it cannot parse is passed through
//! untouched and logged; normalization never fails.
//!
//! # Example
//!
//! ```
//! use estimai_normalizer::normalize;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "id": "job-1",
//!     "result": {"refined_requirements": "Here you go:\n```json\n{\"tasks\": []}\n```"}
//! });
//!
//! let normalized = normalize(raw);
//! assert_eq!(normalized["result"], json!({"tasks": []}));
//! assert_eq!(normalized["id"], "job-1");
//! ```

#![warn(missing_docs)]

mod error;
mod fenced;
mod normalize;

pub use error::NormalizationFailure;
pub use fenced::{extract_fenced_json, fenced_block};
pub use normalize::{normalize, unwrap_embedded};
