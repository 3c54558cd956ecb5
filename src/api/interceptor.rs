//! Unauthorised-response interception for any gateway.
//!
//! [`GuardedGateway`] decorates another [`DeltaGateway`] and observes every
//! authenticated call. A 401 from any of them triggers the registered
//! [`UnauthorizedHandler`] before the error reaches the caller, so components
//! never need their own status checks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::error::DeltaError;
use super::gateway::DeltaGateway;
use super::models::{
    AnalyzeRequest, AnalyzeResponse, AuthStatus, HealthStatus, HistoryParams, HistoryResponse,
    ScanDetails, UserProfile,
};

/// Policy invoked whenever an authenticated call is rejected with 401.
pub trait UnauthorizedHandler: Send + Sync {
    /// Reacts to a rejected call. `operation` names the call for logging.
    fn on_unauthorized(&self, operation: &'static str);
}

/// Gateway decorator applying the unauthorised policy to every call.
pub struct GuardedGateway<G> {
    inner: G,
    handler: Arc<dyn UnauthorizedHandler>,
}

impl<G> GuardedGateway<G>
where
    G: DeltaGateway,
{
    /// Wraps `inner` so its 401 responses reach `handler`.
    #[must_use]
    pub fn new(inner: G, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        Self { inner, handler }
    }

    /// Borrow the wrapped gateway.
    #[must_use]
    pub const fn inner(&self) -> &G {
        &self.inner
    }

    fn intercept<T>(
        &self,
        operation: &'static str,
        result: Result<T, DeltaError>,
    ) -> Result<T, DeltaError> {
        if let Err(error) = &result
            && error.is_unauthorized()
        {
            warn!(operation, "request rejected as unauthorised; signing out");
            self.handler.on_unauthorized(operation);
        }
        result
    }
}

#[async_trait]
impl<G> DeltaGateway for GuardedGateway<G>
where
    G: DeltaGateway,
{
    async fn auth_status(&self) -> Result<AuthStatus, DeltaError> {
        let result = self.inner.auth_status().await;
        self.intercept("auth status", result)
    }

    async fn current_user(&self) -> Result<UserProfile, DeltaError> {
        let result = self.inner.current_user().await;
        self.intercept("current user", result)
    }

    async fn logout(&self) -> Result<(), DeltaError> {
        let result = self.inner.logout().await;
        self.intercept("logout", result)
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, DeltaError> {
        let result = self.inner.analyze(request).await;
        self.intercept("analyze", result)
    }

    async fn history(&self, params: &HistoryParams) -> Result<HistoryResponse, DeltaError> {
        let result = self.inner.history(params).await;
        self.intercept("history", result)
    }

    async fn scan_details(&self, scan_id: i64) -> Result<ScanDetails, DeltaError> {
        let result = self.inner.scan_details(scan_id).await;
        self.intercept("scan details", result)
    }

    // Health is public and never carries the session.
    async fn health(&self) -> Result<HealthStatus, DeltaError> {
        self.inner.health().await
    }
}
