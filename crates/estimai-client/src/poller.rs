//! Result polling with fallback
//!
//! The storage backend is eventually consistent: the result object appears
//! some time after submission, and until then reads answer 404 (or 403 on
//! buckets that hide missing keys). The poller keeps asking at a fixed
//! interval until the object shows up or the attempt budget runs out.
//!
//! Polling always resolves. Timeouts and permanent failures substitute the
//! injected [`Fixture`] and mark the result [`ResultSource::Fallback`].

use estimai_domain::{CorrelationId, FetchError, Fixture, NormalizedResult, ResultStore};
use estimai_normalizer::normalize;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fetch attempts before giving up
pub const MAX_ATTEMPTS: u32 = 60;

/// Wait between attempts (20 seconds)
pub const POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Lifecycle of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    /// Still fetching
    Polling,
    /// Result object retrieved
    Succeeded,
    /// Budget exhausted without a result
    TimedOut,
    /// Permanent failure before the budget ran out
    Failed,
}

impl PollStatus {
    /// Whether polling has stopped
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollStatus::Polling)
    }

    /// Status name
    pub fn as_str(&self) -> &'static str {
        match self {
            PollStatus::Polling => "polling",
            PollStatus::Succeeded => "succeeded",
            PollStatus::TimedOut => "timed_out",
            PollStatus::Failed => "failed",
        }
    }
}

/// Where a returned result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Fetched from storage
    Live,
    /// Example dataset substituted after a timeout or failure
    Fallback,
}

/// Progress of a single poll
///
/// Owned by the poll loop; observers only ever see copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Job being polled
    pub correlation_id: CorrelationId,
    /// Fetches issued so far
    pub attempts_made: u32,
    /// Current status
    pub status: PollStatus,
}

impl PollState {
    /// Fresh state for `correlation_id`
    pub fn new(correlation_id: CorrelationId) -> Self {
        Self {
            correlation_id,
            attempts_made: 0,
            status: PollStatus::Polling,
        }
    }

    /// Attempt budget
    pub fn max_attempts(&self) -> u32 {
        MAX_ATTEMPTS
    }

    /// Whether another attempt is allowed
    pub fn has_budget(&self) -> bool {
        self.attempts_made < MAX_ATTEMPTS
    }

    fn record_attempt(&mut self) {
        self.attempts_made += 1;
    }

    fn finish(&mut self, status: PollStatus) {
        self.status = status;
    }
}

/// Outcome of polling for one job
#[derive(Debug, Clone, PartialEq)]
pub struct Estimation {
    /// Job id
    pub correlation_id: CorrelationId,
    /// Terminal status
    pub status: PollStatus,
    /// Fetches issued
    pub attempts_made: u32,
    /// Live data or fallback
    pub source: ResultSource,
    /// Normalized document (`{"result": ...}` for fallbacks)
    pub document: Value,
    /// Dataset shown when the document has no `result`
    pub fallback: Fixture,
}

/// What a renderer should display
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView<'a> {
    /// Structured panels
    Structured(NormalizedResult),
    /// `result` could not be read as records; show it verbatim
    Raw(&'a Value),
}

impl Estimation {
    /// Whether the example dataset was substituted
    pub fn is_fallback(&self) -> bool {
        self.source == ResultSource::Fallback
    }

    /// The document's `result` field
    pub fn result(&self) -> Option<&Value> {
        self.document.get("result")
    }

    /// Decide how to display this estimation
    ///
    /// A document with no `result` shows the fallback dataset; a `result`
    /// that is still text (or otherwise unreadable) is shown raw.
    pub fn view(&self) -> ResultView<'_> {
        match self.result() {
            Some(value) => NormalizedResult::from_value(value)
                .map(ResultView::Structured)
                .unwrap_or(ResultView::Raw(value)),
            None => ResultView::Structured(self.fallback.normalized()),
        }
    }
}

/// Polls result storage until a document appears
pub struct ResultPoller {
    store: Arc<dyn ResultStore>,
    fixture: Fixture,
}

impl ResultPoller {
    /// Create a poller over `store`, substituting `fixture` on failure
    pub fn new(store: Arc<dyn ResultStore>, fixture: Fixture) -> Self {
        Self { store, fixture }
    }

    /// Poll until success, timeout or permanent failure
    pub async fn poll(&self, correlation_id: CorrelationId) -> Estimation {
        self.poll_reporting(correlation_id, |_| {}).await
    }

    /// Like [`poll`](Self::poll), calling `on_progress` after every state change
    pub async fn poll_reporting<F>(&self, correlation_id: CorrelationId, mut on_progress: F) -> Estimation
    where
        F: FnMut(&PollState) + Send,
    {
        let mut state = PollState::new(correlation_id);
        info!(
            "Polling for result {} (max {} attempts, every {:?})",
            state.correlation_id.object_key(),
            MAX_ATTEMPTS,
            POLL_INTERVAL
        );
        on_progress(&state);

        loop {
            state.record_attempt();

            let error = match self.store.fetch(&state.correlation_id).await {
                Ok(document) => {
                    state.finish(PollStatus::Succeeded);
                    on_progress(&state);
                    info!(
                        "Result {} retrieved after {} attempt(s)",
                        state.correlation_id, state.attempts_made
                    );
                    return self.live(state, normalize(document));
                }
                Err(e) => e,
            };

            if !error.is_transient() {
                state.finish(PollStatus::Failed);
                on_progress(&state);
                warn!(
                    "Polling {} failed permanently: {}; using example data",
                    state.correlation_id, error
                );
                return self.fallback(state);
            }

            if !state.has_budget() {
                state.finish(PollStatus::TimedOut);
                on_progress(&state);
                warn!(
                    "Max attempts reached for {} (last error: {}); using example data",
                    state.correlation_id, error
                );
                return self.fallback(state);
            }

            log_transient(&state, &error);
            on_progress(&state);
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    fn live(&self, state: PollState, document: Value) -> Estimation {
        Estimation {
            correlation_id: state.correlation_id,
            status: state.status,
            attempts_made: state.attempts_made,
            source: ResultSource::Live,
            document,
            fallback: self.fixture.clone(),
        }
    }

    fn fallback(&self, state: PollState) -> Estimation {
        Estimation {
            correlation_id: state.correlation_id,
            status: state.status,
            attempts_made: state.attempts_made,
            source: ResultSource::Fallback,
            document: self.fixture.document(),
            fallback: self.fixture.clone(),
        }
    }
}

fn log_transient(state: &PollState, error: &FetchError) {
    match error {
        FetchError::NotReady(_) => debug!(
            "Attempt {}/{}: result not ready yet",
            state.attempts_made, MAX_ATTEMPTS
        ),
        other => debug!(
            "Attempt {}/{} failed, retrying: {}",
            state.attempts_made, MAX_ATTEMPTS, other
        ),
    }
}
