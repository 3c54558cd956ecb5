//! Gateway trait naming every backend operation.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::DeltaError;
use super::models::{
    AnalyzeRequest, AnalyzeResponse, AuthStatus, HealthStatus, HistoryParams, HistoryResponse,
    ScanDetails, UserProfile,
};

/// Gateway that can talk to the DELTA backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeltaGateway: Send + Sync {
    /// Fetch the authentication status for the current session cookie.
    async fn auth_status(&self) -> Result<AuthStatus, DeltaError>;

    /// Fetch the profile of the signed-in user.
    async fn current_user(&self) -> Result<UserProfile, DeltaError>;

    /// Ask the backend to clear the session cookie.
    async fn logout(&self) -> Result<(), DeltaError>;

    /// Request a summary of a merge request.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, DeltaError>;

    /// Fetch one page of the scan history.
    async fn history(&self, params: &HistoryParams) -> Result<HistoryResponse, DeltaError>;

    /// Fetch a stored scan including its summary.
    async fn scan_details(&self, scan_id: i64) -> Result<ScanDetails, DeltaError>;

    /// Query the unauthenticated health endpoint.
    async fn health(&self) -> Result<HealthStatus, DeltaError>;
}

#[async_trait]
impl<G> DeltaGateway for Arc<G>
where
    G: DeltaGateway + ?Sized,
{
    async fn auth_status(&self) -> Result<AuthStatus, DeltaError> {
        (**self).auth_status().await
    }

    async fn current_user(&self) -> Result<UserProfile, DeltaError> {
        (**self).current_user().await
    }

    async fn logout(&self) -> Result<(), DeltaError> {
        (**self).logout().await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, DeltaError> {
        (**self).analyze(request).await
    }

    async fn history(&self, params: &HistoryParams) -> Result<HistoryResponse, DeltaError> {
        (**self).history(params).await
    }

    async fn scan_details(&self, scan_id: i64) -> Result<ScanDetails, DeltaError> {
        (**self).scan_details(scan_id).await
    }

    async fn health(&self) -> Result<HealthStatus, DeltaError> {
        (**self).health().await
    }
}
