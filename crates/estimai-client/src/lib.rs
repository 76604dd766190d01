//! EstimAI Client
//!
//! Submits project requirements to the estimation service and retrieves the
//! result once it lands in object storage.
//!
//! # Architecture
//!
//! ```text
//! requirements → SubmissionClient → CorrelationId → ResultPoller → normalize → Estimation
//!                  (http | simulated)                 (GET {id}.json, 60 × 20s)
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use estimai_client::{ClientConfig, EstimationFlow};
//! use estimai_domain::EstimationRequest;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env();
//! let flow = Arc::new(EstimationFlow::from_config(&config)?);
//!
//! let request = EstimationRequest::new("Online store with payments", "3 devs, 2 months")?;
//! let handle = flow.spawn(request);
//!
//! let estimation = handle.join().await?;
//! println!("{} ({:?}, {} attempts)", estimation.correlation_id, estimation.source, estimation.attempts_made);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod flow;
mod http;
mod poller;
mod share;
mod store;
mod submit;
mod transport;

pub use config::{ClientConfig, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_API_URL, ENV_STORAGE_URL};
pub use error::{ClientError, FlowError, SubmissionError};
pub use flow::{EstimationFlow, FlowHandle, FlowProgress};
pub use http::API_KEY_HEADER;
pub use poller::{
    Estimation, PollState, PollStatus, ResultPoller, ResultSource, ResultView, MAX_ATTEMPTS, POLL_INTERVAL,
};
pub use share::{export_file_name, export_to, share_url};
pub use store::{store_for, HttpResultStore, UnconfiguredStore};
pub use submit::SubmissionClient;
pub use transport::{transport_for, HttpTransport, SimulatedTransport, SIMULATED_LATENCY};
