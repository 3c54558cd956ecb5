//! `reqwest` implementation of the DELTA gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::endpoint::{
    ANALYZE_PATH, AUTH_LOGOUT_PATH, AUTH_ME_PATH, AUTH_STATUS_PATH, ApiBase, HEALTH_PATH,
    HISTORY_PATH, SESSION_COOKIE,
};
use super::error::DeltaError;
use super::error_mapping::{
    Operation, extract_detail, map_decode_error, map_http_error, map_transport_error,
};
use super::gateway::DeltaGateway;
use super::models::{
    AnalyzeRequest, AnalyzeResponse, AuthStatus, HealthStatus, HistoryParams, HistoryResponse,
    ScanDetails, UserProfile,
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Options for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGatewayOptions {
    /// Transport timeout applied to every request.
    pub timeout: Duration,
    /// Session token seeded into the cookie jar, if already known.
    pub session_token: Option<String>,
}

impl Default for HttpGatewayOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_token: None,
        }
    }
}

/// Cookie-authenticated HTTP gateway.
///
/// Every request goes through one client whose cookie jar carries the backend
/// session, so credentials never have to be attached per call.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: ApiBase,
}

impl HttpGateway {
    /// Builds a gateway for the given backend.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(base: ApiBase, options: HttpGatewayOptions) -> Result<Self, DeltaError> {
        let jar = Arc::new(Jar::default());
        if let Some(token) = options.session_token.as_deref() {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), base.as_url());
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .timeout(options.timeout)
            .build()
            .map_err(|error| DeltaError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self { client, base })
    }

    /// Backend base URL.
    #[must_use]
    pub const fn base(&self) -> &ApiBase {
        &self.base
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, DeltaError> {
        debug!(operation = operation.label(), "sending request");
        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        if status.is_success() {
            debug!(operation = operation.label(), %status, "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(operation = operation.label(), %status, "request failed");
        Err(map_http_error(operation, status, extract_detail(&body)))
    }

    async fn fetch_json<T>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, DeltaError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(operation, request).await?;
        let status = response.status();
        response
            .json::<T>()
            .await
            .map_err(|error| map_decode_error(operation, status, &error))
    }
}

#[async_trait]
impl DeltaGateway for HttpGateway {
    async fn auth_status(&self) -> Result<AuthStatus, DeltaError> {
        let url = self.base.endpoint(AUTH_STATUS_PATH)?;
        self.fetch_json(Operation::AuthStatus, self.client.get(url))
            .await
    }

    async fn current_user(&self) -> Result<UserProfile, DeltaError> {
        let url = self.base.endpoint(AUTH_ME_PATH)?;
        self.fetch_json(Operation::CurrentUser, self.client.get(url))
            .await
    }

    async fn logout(&self) -> Result<(), DeltaError> {
        let url = self
            .base
            .endpoint(AUTH_LOGOUT_PATH)
            .map_err(|error| DeltaError::Authentication {
                message: error.to_string(),
            })?;
        self.send(Operation::Logout, self.client.post(url))
            .await
            .map(drop)
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, DeltaError> {
        let url = self.base.endpoint(ANALYZE_PATH)?;
        self.fetch_json(Operation::Analyze, self.client.post(url).json(request))
            .await
    }

    async fn history(&self, params: &HistoryParams) -> Result<HistoryResponse, DeltaError> {
        let url = self.base.endpoint(HISTORY_PATH)?;
        let query = params.query_pairs();
        self.fetch_json(Operation::History, self.client.get(url).query(&query))
            .await
    }

    async fn scan_details(&self, scan_id: i64) -> Result<ScanDetails, DeltaError> {
        let url = self.base.scan_url(scan_id)?;
        self.fetch_json(Operation::ScanDetails, self.client.get(url))
            .await
    }

    async fn health(&self) -> Result<HealthStatus, DeltaError> {
        let url = self.base.endpoint(HEALTH_PATH)?;
        self.fetch_json(Operation::Health, self.client.get(url))
            .await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
