//! Client telemetry events and sinks.
//!
//! Events stay on the local machine. They capture the operational signals that
//! help when debugging a session: how the session resolved, whether analyses
//! hit the backend cache, and how often history responses arrive too late to
//! matter.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the DELTA client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A status check finished and the session settled.
    SessionResolved {
        /// Whether the session ended up authenticated.
        authenticated: bool,
    },
    /// An analysis request returned a summary.
    AnalysisCompleted {
        /// Whether the backend served the summary from its cache.
        cached: bool,
    },
    /// A history response arrived after a newer request had been issued.
    StaleHistoryDiscarded {
        /// Generation of the discarded response.
        generation: u64,
        /// Generation the browser was waiting for.
        latest: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Writes events to stderr as JSON lines.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(line) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = write_stderr_line(&line);
    }
}

fn write_stderr_line(line: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{line}")
}

/// Sink that keeps events in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Drains the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}
