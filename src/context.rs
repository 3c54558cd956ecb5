//! Collaborators shared by the client components.

use std::sync::Arc;

use crate::notify::Notifier;
use crate::routing::Navigator;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Handles to the navigation, notification, and telemetry collaborators.
#[derive(Clone)]
pub struct ViewContext {
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ViewContext {
    /// Builds a context that drops telemetry.
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            navigator,
            notifier,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Navigator for page transitions.
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Notifier for user-facing messages.
    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub(crate) fn navigator_handle(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    pub(crate) fn record(&self, event: TelemetryEvent) {
        self.telemetry.record(event);
    }
}
