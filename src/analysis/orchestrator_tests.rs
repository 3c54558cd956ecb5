//! Tests for the analysis orchestrator.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::AnalysisOrchestrator;
use crate::analysis::{AnalysisState, SubmitOutcome};
use crate::api::{
    AnalyzeRequest, AnalyzeResponse, DeltaError, MockDeltaGateway, MrHeader, StubGateway,
};
use crate::context::ViewContext;
use crate::notify::{Notification, RecordingNotifier};
use crate::routing::RecordingNavigator;
use crate::telemetry::{RecordingTelemetrySink, TelemetryEvent};

const MR_URL: &str = "https://gitlab.example.com/g/p/-/merge_requests/12";

struct Harness {
    notifier: Arc<RecordingNotifier>,
    telemetry: Arc<RecordingTelemetrySink>,
}

impl Harness {
    fn orchestrator<G>(&self, gateway: G) -> AnalysisOrchestrator<G>
    where
        G: crate::api::DeltaGateway,
    {
        let context = ViewContext::new(
            Arc::new(RecordingNavigator::default()),
            self.notifier.clone(),
        )
        .with_telemetry(self.telemetry.clone());
        AnalysisOrchestrator::new(gateway, context)
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        notifier: Arc::new(RecordingNotifier::default()),
        telemetry: Arc::new(RecordingTelemetrySink::default()),
    }
}

fn response(cached: bool) -> AnalyzeResponse {
    AnalyzeResponse {
        mr_header: MrHeader {
            title: "Add caching".to_owned(),
            author: "Ada Lovelace".to_owned(),
            status: "Open".to_owned(),
            url: MR_URL.to_owned(),
        },
        summary_markdown: "## Summary".to_owned(),
        cached,
        scanned_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 10, 15, 0)
            .single()
            .expect("timestamp should be valid"),
    }
}

#[rstest]
#[case::fresh(false, "Summary generated successfully!")]
#[case::cached(true, "Summary loaded from cache (instant!)")]
#[tokio::test]
async fn successful_analysis_is_published(
    harness: Harness,
    #[case] cached: bool,
    #[case] message: &str,
) {
    let mut gateway = MockDeltaGateway::new();
    gateway
        .expect_analyze()
        .with(eq(AnalyzeRequest::new(MR_URL)))
        .times(1)
        .returning(move |_| Ok(response(cached)));
    let orchestrator = harness.orchestrator(gateway);

    let outcome = orchestrator.submit(MR_URL).await;

    assert_eq!(outcome, SubmitOutcome::Completed(response(cached)));
    assert_eq!(orchestrator.state(), AnalysisState::Success(response(cached)));
    assert_eq!(
        harness.notifier.notifications(),
        vec![Notification::success(message)]
    );
    assert_eq!(
        harness.telemetry.take(),
        vec![TelemetryEvent::AnalysisCompleted { cached }]
    );
}

#[rstest]
#[case::blank("  ", "Please enter a GitLab MR URL")]
#[case::not_a_merge_request(
    "https://gitlab.example.com/g/p/-/issues/4",
    "Please enter a valid GitLab merge request URL"
)]
#[tokio::test]
async fn invalid_input_never_reaches_the_backend(
    harness: Harness,
    #[case] input: &str,
    #[case] message: &str,
) {
    let mut gateway = MockDeltaGateway::new();
    gateway.expect_analyze().never();
    let orchestrator = harness.orchestrator(gateway);

    let outcome = orchestrator.submit(input).await;

    assert_eq!(outcome, SubmitOutcome::Rejected(message.to_owned()));
    assert_eq!(orchestrator.state(), AnalysisState::Idle);
    assert_eq!(
        harness.notifier.notifications(),
        vec![Notification::error(message)]
    );
}

#[rstest]
#[tokio::test]
async fn rejected_input_keeps_the_previous_result(harness: Harness) {
    let mut gateway = MockDeltaGateway::new();
    gateway
        .expect_analyze()
        .times(1)
        .returning(|_| Ok(response(false)));
    let orchestrator = harness.orchestrator(gateway);
    orchestrator.submit(MR_URL).await;

    let outcome = orchestrator.submit("").await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(orchestrator.state(), AnalysisState::Success(response(false)));
}

#[rstest]
#[case::backend_detail(
    DeltaError::Analysis { message: "Merge request not found or you don't have access to it.".to_owned() },
    "Merge request not found or you don't have access to it."
)]
#[case::no_detail(
    DeltaError::Api { status: 502, message: "analyze failed: unknown error".to_owned() },
    "Failed to analyze merge request"
)]
#[case::network(
    DeltaError::Network { message: "connection reset".to_owned() },
    "Failed to analyze merge request"
)]
#[tokio::test]
async fn failures_show_backend_detail_or_fallback(
    harness: Harness,
    #[case] error: DeltaError,
    #[case] message: &str,
) {
    let mut gateway = MockDeltaGateway::new();
    gateway
        .expect_analyze()
        .times(1)
        .returning(move |_| Err(error.clone()));
    let orchestrator = harness.orchestrator(gateway);

    let outcome = orchestrator.submit(MR_URL).await;

    assert_eq!(outcome, SubmitOutcome::Failed(message.to_owned()));
    assert_eq!(orchestrator.state(), AnalysisState::Error(message.to_owned()));
    assert!(orchestrator.state().result().is_none());
    assert_eq!(
        harness.notifier.notifications(),
        vec![Notification::error(message)]
    );
}

#[rstest]
#[tokio::test]
async fn unauthorized_failures_stay_quiet(harness: Harness) {
    let mut gateway = MockDeltaGateway::new();
    gateway.expect_analyze().times(1).returning(|_| {
        Err(DeltaError::Unauthorized {
            message: "Could not validate credentials".to_owned(),
        })
    });
    let orchestrator = harness.orchestrator(gateway);

    let outcome = orchestrator.submit(MR_URL).await;

    assert_eq!(outcome, SubmitOutcome::SignedOut);
    assert_eq!(orchestrator.state(), AnalysisState::Idle);
    assert!(harness.notifier.notifications().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn second_submission_is_rejected_while_pending(harness: Harness) {
    let gateway = Arc::new(StubGateway::new());
    gateway.push_analyze_after(Duration::from_secs(5), Ok(response(false)));
    let orchestrator = harness.orchestrator(gateway.clone());

    let (first, second) = tokio::join!(orchestrator.submit(MR_URL), async {
        tokio::task::yield_now().await;
        assert!(orchestrator.is_busy());
        orchestrator.submit(MR_URL).await
    });

    assert_eq!(first, SubmitOutcome::Completed(response(false)));
    assert_eq!(second, SubmitOutcome::Busy);
    assert_eq!(gateway.analyze_requests().len(), 1);
    assert!(!orchestrator.is_busy());
}

#[rstest]
#[tokio::test]
async fn every_submission_is_a_fresh_request(harness: Harness) {
    let gateway = Arc::new(StubGateway::new());
    gateway.push_analyze(Ok(response(false)));
    gateway.push_analyze(Ok(response(true)));
    let orchestrator = harness.orchestrator(gateway.clone());

    orchestrator.submit(MR_URL).await;
    let outcome = orchestrator.submit(MR_URL).await;

    assert_eq!(outcome, SubmitOutcome::Completed(response(true)));
    assert_eq!(
        gateway.analyze_requests(),
        vec![AnalyzeRequest::new(MR_URL), AnalyzeRequest::new(MR_URL)]
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn abandoned_submission_frees_the_orchestrator(harness: Harness) {
    let gateway = Arc::new(StubGateway::new());
    gateway.push_analyze_after(Duration::from_secs(5), Ok(response(false)));
    gateway.push_analyze(Ok(response(true)));
    let orchestrator = harness.orchestrator(gateway.clone());

    let abandoned = tokio::time::timeout(Duration::from_secs(1), orchestrator.submit(MR_URL)).await;

    assert!(abandoned.is_err());
    assert!(!orchestrator.is_busy());
    assert_eq!(orchestrator.state(), AnalysisState::Idle);

    let outcome = orchestrator.submit(MR_URL).await;

    assert_eq!(outcome, SubmitOutcome::Completed(response(true)));
    assert_eq!(gateway.analyze_requests().len(), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn abandoned_submission_restores_the_previous_result(harness: Harness) {
    let gateway = Arc::new(StubGateway::new());
    gateway.push_analyze(Ok(response(false)));
    gateway.push_analyze_after(Duration::from_secs(5), Ok(response(true)));
    let orchestrator = harness.orchestrator(gateway);
    orchestrator.submit(MR_URL).await;

    let abandoned = tokio::time::timeout(Duration::from_secs(1), orchestrator.submit(MR_URL)).await;

    assert!(abandoned.is_err());
    assert_eq!(orchestrator.state(), AnalysisState::Success(response(false)));
}

#[rstest]
#[tokio::test]
async fn failure_replaces_an_earlier_result(harness: Harness) {
    let gateway = Arc::new(StubGateway::new());
    gateway.push_analyze(Ok(response(false)));
    gateway.push_analyze(Err(DeltaError::Network {
        message: "connection reset".to_owned(),
    }));
    let orchestrator = harness.orchestrator(gateway);
    orchestrator.submit(MR_URL).await;
    assert!(orchestrator.state().result().is_some());

    let outcome = orchestrator.submit(MR_URL).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("Failed to analyze merge request".to_owned())
    );
    assert!(orchestrator.state().result().is_none());
    assert_eq!(
        orchestrator.state(),
        AnalysisState::Error("Failed to analyze merge request".to_owned())
    );
}
