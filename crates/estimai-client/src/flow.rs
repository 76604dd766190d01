//! End-to-end estimation flow with cancellation
//!
//! A flow is one sequential chain: submit, then poll. Spawned flows run on
//! their own task and hand back a [`FlowHandle`]; cancelling or dropping the
//! handle aborts the task, so no further fetches are issued for a job nobody
//! is waiting on.

use crate::config::ClientConfig;
use crate::error::{ClientError, FlowError, SubmissionError};
use crate::poller::{Estimation, PollState, ResultPoller};
use crate::store::store_for;
use crate::submit::SubmissionClient;
use estimai_domain::{CorrelationId, EstimationRequest, Fixture};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// Observable stage of a running flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowProgress {
    /// Request is being submitted
    Submitting,
    /// Waiting for the result object
    Polling(PollState),
}

/// Submission client and poller wired together
pub struct EstimationFlow {
    submitter: SubmissionClient,
    poller: ResultPoller,
}

impl EstimationFlow {
    /// Combine a submission client and a poller
    pub fn new(submitter: SubmissionClient, poller: ResultPoller) -> Self {
        Self { submitter, poller }
    }

    /// Build a flow from configuration with the example fallback dataset
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate().map_err(ClientError::Config)?;
        Ok(Self::new(
            SubmissionClient::from_config(config)?,
            ResultPoller::new(store_for(config)?, Fixture::example()),
        ))
    }

    /// Submit and poll on the current task
    pub async fn run(&self, request: &EstimationRequest) -> Result<Estimation, SubmissionError> {
        let id = self.submitter.submit_request(request).await?;
        Ok(self.poller.poll(id).await)
    }

    /// Submit and poll on a new task
    pub fn spawn(self: Arc<Self>, request: EstimationRequest) -> FlowHandle {
        let (progress_tx, progress_rx) = watch::channel(FlowProgress::Submitting);
        let task = tokio::spawn(async move {
            let id = self.submitter.submit_request(&request).await?;
            Ok::<_, SubmissionError>(self.poll_with_progress(id, progress_tx).await)
        });
        FlowHandle::new(task, progress_rx)
    }

    /// Poll an existing job on a new task
    pub fn spawn_poll(self: Arc<Self>, id: CorrelationId) -> FlowHandle {
        let (progress_tx, progress_rx) = watch::channel(FlowProgress::Polling(PollState::new(id.clone())));
        let task = tokio::spawn(async move {
            Ok::<_, SubmissionError>(self.poll_with_progress(id, progress_tx).await)
        });
        FlowHandle::new(task, progress_rx)
    }

    async fn poll_with_progress(&self, id: CorrelationId, progress: watch::Sender<FlowProgress>) -> Estimation {
        self.poller
            .poll_reporting(id, |state| {
                progress.send_replace(FlowProgress::Polling(state.clone()));
            })
            .await
    }
}

/// Handle to a spawned flow
///
/// Dropping the handle cancels the flow.
pub struct FlowHandle {
    task: JoinHandle<Result<Estimation, SubmissionError>>,
    progress: watch::Receiver<FlowProgress>,
}

impl FlowHandle {
    fn new(
        task: JoinHandle<Result<Estimation, SubmissionError>>,
        progress: watch::Receiver<FlowProgress>,
    ) -> Self {
        Self { task, progress }
    }

    /// Subscribe to progress updates
    pub fn progress(&self) -> watch::Receiver<FlowProgress> {
        self.progress.clone()
    }

    /// Stop the flow; pending waits are dropped and no further fetches run
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            info!("Cancelling estimation flow");
        }
        self.task.abort();
    }

    /// Wait for the flow to finish
    pub async fn join(mut self) -> Result<Estimation, FlowError> {
        match (&mut self.task).await {
            Ok(outcome) => outcome.map_err(FlowError::from),
            Err(e) if e.is_cancelled() => Err(FlowError::Cancelled),
            Err(e) => Err(FlowError::Aborted(e.to_string())),
        }
    }
}

impl Drop for FlowHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
