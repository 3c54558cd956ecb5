//! Shared test utilities for CLI tests.

use std::sync::Arc;

use rstest::fixture;

use delta::api::StubGateway;
use delta::notify::RecordingNotifier;
use delta::routing::RecordingNavigator;
use delta::{ApiBase, DeltaApp, ViewContext};

/// A client wired to a scripted gateway and recording collaborators.
pub struct TestApp {
    /// Application under test.
    pub app: DeltaApp<Arc<StubGateway>>,
    /// Scripted backend.
    pub gateway: Arc<StubGateway>,
    /// Records page transitions.
    pub navigator: Arc<RecordingNavigator>,
    /// Records notifications.
    pub notifier: Arc<RecordingNotifier>,
}

/// Builds a [`TestApp`] against `http://localhost:8000`.
#[fixture]
pub fn test_app() -> TestApp {
    let gateway = Arc::new(StubGateway::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let context = ViewContext::new(navigator.clone(), notifier.clone());
    let base = ApiBase::parse("http://localhost:8000").expect("base URL should parse");
    let app = DeltaApp::new(Arc::clone(&gateway), &base, context, 20)
        .expect("client should wire");
    TestApp {
        app,
        gateway,
        navigator,
        notifier,
    }
}
