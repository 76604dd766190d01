//! EstimAI Domain Layer
//!
//! Core value types and trait seams shared by every EstimAI crate.
//!
//! ## Key Concepts
//!
//! - **EstimationRequest**: validated, trimmed user input for one estimation job
//! - **CorrelationId**: opaque key linking a submission to its eventual result object
//! - **NormalizedResult**: display records (epics, risks, tasks, work plan)
//! - **Fixture**: the versioned example dataset substituted when retrieval fails
//!
//! ## Architecture
//!
//! Infrastructure (HTTP transports, object storage) lives in `estimai-client`.
//! This crate only defines the shapes and the traits those implementations satisfy.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod correlation;
pub mod error;
pub mod estimate;
pub mod fallback;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use correlation::CorrelationId;
pub use error::{FetchError, TransportError, ValidationError};
pub use estimate::{Epic, Milestone, NormalizedResult, Phase, RefinedRequirements, RiskAnalysis, Task, WorkPlan};
pub use fallback::Fixture;
pub use request::EstimationRequest;
pub use traits::{EstimationTransport, ResultStore};
