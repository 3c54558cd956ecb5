//! Merge request analysis workflow.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::merge_request_url::MergeRequestUrl;
use super::state::{AnalysisState, SubmitOutcome};
use crate::api::{AnalyzeRequest, DeltaGateway};
use crate::context::ViewContext;
use crate::notify::Notification;
use crate::telemetry::TelemetryEvent;

const CACHED_MESSAGE: &str = "Summary loaded from cache (instant!)";
const GENERATED_MESSAGE: &str = "Summary generated successfully!";
const FALLBACK_ERROR_MESSAGE: &str = "Failed to analyze merge request";

/// Validates merge request URLs, submits them for analysis, and publishes
/// the resulting display state.
///
/// Only one submission runs at a time; extra submissions are turned away
/// without touching the backend.
pub struct AnalysisOrchestrator<G> {
    gateway: G,
    context: ViewContext,
    state: watch::Sender<AnalysisState>,
}

impl<G> AnalysisOrchestrator<G>
where
    G: DeltaGateway,
{
    /// Creates an idle orchestrator.
    #[must_use]
    pub fn new(gateway: G, context: ViewContext) -> Self {
        let (state, _receiver) = watch::channel(AnalysisState::Idle);
        Self {
            gateway,
            context,
            state,
        }
    }

    /// Current display state.
    #[must_use]
    pub fn state(&self) -> AnalysisState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    /// True while a submission is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Validates `input` and requests a summary for it.
    ///
    /// Dropping the returned future before it completes puts back the state
    /// shown before the submission, so an abandoned request never leaves the
    /// orchestrator busy.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let Some(claim) = self.claim() else {
            debug!("analysis already running; submission ignored");
            return SubmitOutcome::Busy;
        };

        let url = match MergeRequestUrl::parse(input) {
            Ok(url) => url,
            Err(error) => {
                let message = error.to_string();
                claim.release();
                self.context
                    .notifier()
                    .notify(Notification::error(message.clone()));
                return SubmitOutcome::Rejected(message);
            }
        };

        self.state.send_replace(AnalysisState::Analyzing);
        info!(url = %url, "requesting merge request summary");

        match self.gateway.analyze(&AnalyzeRequest::new(url.as_str())).await {
            Ok(response) => {
                let message = if response.cached {
                    CACHED_MESSAGE
                } else {
                    GENERATED_MESSAGE
                };
                self.context.record(TelemetryEvent::AnalysisCompleted {
                    cached: response.cached,
                });
                claim.settle(AnalysisState::Success(response.clone()));
                self.context
                    .notifier()
                    .notify(Notification::success(message));
                SubmitOutcome::Completed(response)
            }
            Err(error) if error.is_unauthorized() => {
                claim.settle(AnalysisState::Idle);
                SubmitOutcome::SignedOut
            }
            Err(error) => {
                warn!(%error, "analysis failed");
                let message = error
                    .backend_detail()
                    .unwrap_or(FALLBACK_ERROR_MESSAGE)
                    .to_owned();
                claim.settle(AnalysisState::Error(message.clone()));
                self.context
                    .notifier()
                    .notify(Notification::error(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Moves to `Validating` unless a submission is already running.
    fn claim(&self) -> Option<Claim<'_>> {
        let mut previous = None;
        self.state.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            previous = Some(std::mem::replace(state, AnalysisState::Validating));
            true
        });
        previous.map(|shown| Claim {
            state: &self.state,
            previous: Some(shown),
        })
    }
}

/// Exclusive hold on the busy state for one submission.
///
/// Holds the state displayed before the submission until the submission
/// settles. Dropping an unsettled claim restores it.
struct Claim<'a> {
    state: &'a watch::Sender<AnalysisState>,
    previous: Option<AnalysisState>,
}

impl Claim<'_> {
    /// Publishes the final state of a finished submission.
    fn settle(mut self, next: AnalysisState) {
        self.previous = None;
        self.state.send_replace(next);
    }

    /// Puts back the state shown before the submission.
    fn release(mut self) {
        if let Some(previous) = self.previous.take() {
            self.state.send_replace(previous);
        }
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!("analysis submission abandoned; restoring previous state");
            self.state.send_replace(previous);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
