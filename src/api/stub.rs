//! Scripted in-memory gateway for tests.
//!
//! Each operation pops the next queued result, optionally after a delay, so
//! tests can reproduce out-of-order responses deterministically under a
//! paused tokio clock.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::error::DeltaError;
use super::gateway::DeltaGateway;
use super::models::{
    AnalyzeRequest, AnalyzeResponse, AuthStatus, HealthStatus, HistoryParams, HistoryResponse,
    ScanDetails, UserProfile,
};

struct Scripted<T> {
    delay: Duration,
    result: Result<T, DeltaError>,
}

struct ScriptQueue<T> {
    operation: &'static str,
    entries: Mutex<VecDeque<Scripted<T>>>,
}

impl<T> ScriptQueue<T> {
    const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, delay: Duration, result: Result<T, DeltaError>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted { delay, result });
    }

    async fn next(&self) -> Result<T, DeltaError> {
        let entry = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some(Scripted { delay, result }) = entry else {
            return Err(DeltaError::Api {
                status: 500,
                message: format!("no scripted response for {}", self.operation),
            });
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

/// Gateway returning queued results in order.
///
/// An operation with nothing queued fails with a 500 [`DeltaError::Api`].
pub struct StubGateway {
    auth_status: ScriptQueue<AuthStatus>,
    current_user: ScriptQueue<UserProfile>,
    logout: ScriptQueue<()>,
    analyze: ScriptQueue<AnalyzeResponse>,
    history: ScriptQueue<HistoryResponse>,
    scan_details: ScriptQueue<ScanDetails>,
    health: ScriptQueue<HealthStatus>,
    analyze_requests: Mutex<Vec<AnalyzeRequest>>,
    history_requests: Mutex<Vec<HistoryParams>>,
    auth_status_calls: Mutex<usize>,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl StubGateway {
    /// Creates a gateway with empty scripts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            auth_status: ScriptQueue::new("auth status"),
            current_user: ScriptQueue::new("current user"),
            logout: ScriptQueue::new("logout"),
            analyze: ScriptQueue::new("analyze"),
            history: ScriptQueue::new("history"),
            scan_details: ScriptQueue::new("scan details"),
            health: ScriptQueue::new("health"),
            analyze_requests: Mutex::new(Vec::new()),
            history_requests: Mutex::new(Vec::new()),
            auth_status_calls: Mutex::new(0),
        }
    }

    /// Queues an auth status result.
    pub fn push_auth_status(&self, result: Result<AuthStatus, DeltaError>) {
        self.auth_status.push(Duration::ZERO, result);
    }

    /// Queues an auth status result delivered after `delay`.
    pub fn push_auth_status_after(&self, delay: Duration, result: Result<AuthStatus, DeltaError>) {
        self.auth_status.push(delay, result);
    }

    /// Queues a current user result.
    pub fn push_current_user(&self, result: Result<UserProfile, DeltaError>) {
        self.current_user.push(Duration::ZERO, result);
    }

    /// Queues a logout result.
    pub fn push_logout(&self, result: Result<(), DeltaError>) {
        self.logout.push(Duration::ZERO, result);
    }

    /// Queues an analysis result.
    pub fn push_analyze(&self, result: Result<AnalyzeResponse, DeltaError>) {
        self.analyze.push(Duration::ZERO, result);
    }

    /// Queues an analysis result delivered after `delay`.
    pub fn push_analyze_after(&self, delay: Duration, result: Result<AnalyzeResponse, DeltaError>) {
        self.analyze.push(delay, result);
    }

    /// Queues a history page.
    pub fn push_history(&self, result: Result<HistoryResponse, DeltaError>) {
        self.history.push(Duration::ZERO, result);
    }

    /// Queues a history page delivered after `delay`.
    pub fn push_history_after(&self, delay: Duration, result: Result<HistoryResponse, DeltaError>) {
        self.history.push(delay, result);
    }

    /// Queues a scan details result.
    pub fn push_scan_details(&self, result: Result<ScanDetails, DeltaError>) {
        self.scan_details.push(Duration::ZERO, result);
    }

    /// Queues a health result.
    pub fn push_health(&self, result: Result<HealthStatus, DeltaError>) {
        self.health.push(Duration::ZERO, result);
    }

    /// Analysis requests received so far.
    #[must_use]
    pub fn analyze_requests(&self) -> Vec<AnalyzeRequest> {
        self.analyze_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// History parameters received so far.
    #[must_use]
    pub fn history_requests(&self) -> Vec<HistoryParams> {
        self.history_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of auth status calls received.
    #[must_use]
    pub fn auth_status_calls(&self) -> usize {
        *self
            .auth_status_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DeltaGateway for StubGateway {
    async fn auth_status(&self) -> Result<AuthStatus, DeltaError> {
        *self
            .auth_status_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        self.auth_status.next().await
    }

    async fn current_user(&self) -> Result<UserProfile, DeltaError> {
        self.current_user.next().await
    }

    async fn logout(&self) -> Result<(), DeltaError> {
        self.logout.next().await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, DeltaError> {
        self.analyze_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.analyze.next().await
    }

    async fn history(&self, params: &HistoryParams) -> Result<HistoryResponse, DeltaError> {
        self.history_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params.clone());
        self.history.next().await
    }

    async fn scan_details(&self, _scan_id: i64) -> Result<ScanDetails, DeltaError> {
        self.scan_details.next().await
    }

    async fn health(&self) -> Result<HealthStatus, DeltaError> {
        self.health.next().await
    }
}
