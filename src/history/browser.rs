//! Paginated, searchable scan history.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::window::{EmptyState, PageWindow};
use crate::api::{DeltaError, DeltaGateway, HistoryParams, HistoryResponse, ScanHistoryItem};
use crate::context::ViewContext;
use crate::notify::Notification;
use crate::telemetry::TelemetryEvent;

/// Page size used by the history view.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

const LOAD_FAILURE_MESSAGE: &str = "Failed to load history";

/// What the history view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    /// Search text as typed.
    pub query: String,
    /// Page size.
    pub limit: u32,
    /// Index of the first requested row.
    pub offset: u64,
    /// Rows of the loaded page.
    pub scans: Vec<ScanHistoryItem>,
    /// Matching rows across all pages.
    pub total: u64,
    /// A fetch is in flight.
    pub loading: bool,
    /// Tag of the most recent fetch.
    pub generation: u64,
    /// Message of the last failed fetch, cleared by the next success.
    pub error: Option<String>,
}

impl HistorySnapshot {
    fn new(limit: u32) -> Self {
        Self {
            query: String::new(),
            limit,
            offset: 0,
            scans: Vec::new(),
            total: 0,
            loading: false,
            generation: 0,
            error: None,
        }
    }

    /// Pagination window for the current page.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        PageWindow::new(self.offset, self.limit, self.total)
    }

    /// Empty-state variant, when the settled page has no rows.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        (!self.loading && self.scans.is_empty()).then(|| EmptyState::for_query(&self.query))
    }
}

/// Result of a history operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied.
    Applied,
    /// A newer fetch started meanwhile; the response was discarded.
    Stale,
    /// The browser was closed; nothing was written.
    Closed,
    /// The fetch failed; the snapshot carries the user-facing message.
    Failed(DeltaError),
    /// The session was rejected and the user has been signed out.
    SignedOut,
    /// The pagination control is disabled; nothing was fetched.
    Ignored,
    /// The query did not change; nothing was fetched.
    Unchanged,
}

struct Inner {
    snapshot: HistorySnapshot,
    closed: bool,
}

/// Drives the history view.
///
/// Each fetch carries a generation number and only the latest generation may
/// write, so responses that arrive out of order never overwrite newer data.
pub struct HistoryBrowser<G> {
    gateway: G,
    context: ViewContext,
    inner: Mutex<Inner>,
}

impl<G> HistoryBrowser<G>
where
    G: DeltaGateway,
{
    /// Creates a browser with the given page size.
    #[must_use]
    pub fn new(gateway: G, context: ViewContext, limit: u32) -> Self {
        Self {
            gateway,
            context,
            inner: Mutex::new(Inner {
                snapshot: HistorySnapshot::new(limit),
                closed: false,
            }),
        }
    }

    /// Current view state.
    #[must_use]
    pub fn snapshot(&self) -> HistorySnapshot {
        self.lock().snapshot.clone()
    }

    /// Fetches the current page again.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch().await
    }

    /// Changes the search text and returns to the first page.
    pub async fn set_query(&self, query: &str) -> FetchOutcome {
        {
            let mut inner = self.lock();
            if inner.closed {
                return FetchOutcome::Closed;
            }
            if inner.snapshot.query == query && inner.snapshot.offset == 0 {
                return FetchOutcome::Unchanged;
            }
            query.clone_into(&mut inner.snapshot.query);
            inner.snapshot.offset = 0;
        }
        self.fetch().await
    }

    /// Moves to the following page when one exists.
    pub async fn next_page(&self) -> FetchOutcome {
        {
            let mut inner = self.lock();
            let window = inner.snapshot.window();
            if !window.has_next() {
                return FetchOutcome::Ignored;
            }
            inner.snapshot.offset = window.next_offset();
        }
        self.fetch().await
    }

    /// Moves to the preceding page when one exists.
    pub async fn previous_page(&self) -> FetchOutcome {
        {
            let mut inner = self.lock();
            let window = inner.snapshot.window();
            if !window.has_previous() {
                return FetchOutcome::Ignored;
            }
            inner.snapshot.offset = window.previous_offset();
        }
        self.fetch().await
    }

    /// Loads the page starting at `offset` for `query` in one fetch.
    pub async fn seek(&self, query: &str, offset: u64) -> FetchOutcome {
        {
            let mut inner = self.lock();
            query.clone_into(&mut inner.snapshot.query);
            inner.snapshot.offset = offset;
        }
        self.fetch().await
    }

    /// Stops accepting responses. Fetches still in flight are discarded.
    pub fn close(&self) {
        self.lock().closed = true;
        debug!("history browser closed");
    }

    async fn fetch(&self) -> FetchOutcome {
        let Some((generation, params)) = self.begin_fetch() else {
            return FetchOutcome::Closed;
        };
        debug!(generation, offset = params.offset, "fetching history page");
        let result = self.gateway.history(&params).await;
        self.finish_fetch(generation, result)
    }

    fn begin_fetch(&self) -> Option<(u64, HistoryParams)> {
        let mut inner = self.lock();
        if inner.closed {
            return None;
        }
        let snapshot = &mut inner.snapshot;
        snapshot.generation = snapshot.generation.saturating_add(1);
        snapshot.loading = true;
        let params = HistoryParams::new(&snapshot.query, snapshot.limit, snapshot.offset);
        Some((snapshot.generation, params))
    }

    fn finish_fetch(
        &self,
        generation: u64,
        result: Result<HistoryResponse, DeltaError>,
    ) -> FetchOutcome {
        let outcome = {
            let mut inner = self.lock();
            if inner.closed {
                debug!(generation, "history response arrived after close; dropped");
                return FetchOutcome::Closed;
            }
            let latest = inner.snapshot.generation;
            if generation != latest {
                drop(inner);
                warn!(generation, latest, "discarding stale history response");
                self.context
                    .record(TelemetryEvent::StaleHistoryDiscarded { generation, latest });
                return FetchOutcome::Stale;
            }
            apply(&mut inner.snapshot, result)
        };

        if matches!(outcome, FetchOutcome::Failed(_)) {
            self.context
                .notifier()
                .notify(Notification::error(LOAD_FAILURE_MESSAGE));
        }
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply(snapshot: &mut HistorySnapshot, result: Result<HistoryResponse, DeltaError>) -> FetchOutcome {
    snapshot.loading = false;
    match result {
        Ok(response) => {
            let rows = u64::try_from(response.scans.len()).unwrap_or(u64::MAX);
            snapshot.total = response.total.max(rows);
            snapshot.scans = response.scans;
            snapshot.error = None;
            FetchOutcome::Applied
        }
        Err(error) if error.is_unauthorized() => FetchOutcome::SignedOut,
        Err(error) => {
            warn!(%error, "history fetch failed");
            snapshot.error = Some(LOAD_FAILURE_MESSAGE.to_owned());
            FetchOutcome::Failed(error)
        }
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
