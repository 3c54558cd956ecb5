//! Wire models exchanged with the DELTA backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Profile of the signed-in GitLab user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// GitLab user identifier.
    pub gitlab_user_id: String,
    /// GitLab username, when shared.
    #[serde(default)]
    pub username: Option<String>,
    /// Email address, when shared.
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Name to show in the navigation bar.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.gitlab_user_id)
    }
}

/// Response of `GET /auth/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether the backend recognised the session cookie.
    pub authenticated: bool,
    /// Profile of the authenticated user.
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthStatus {
    /// Status for an anonymous visitor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    /// Status for a signed-in user.
    #[must_use]
    pub const fn signed_in(user: UserProfile) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Merge request URL to summarise.
    pub url: String,
}

impl AnalyzeRequest {
    /// Creates a request for the given merge request URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Merge request metadata shown above a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrHeader {
    /// Merge request title.
    pub title: String,
    /// Author display name.
    pub author: String,
    /// State such as `Open`, `Merged`, or `Closed`.
    pub status: String,
    /// Web URL of the merge request.
    pub url: String,
}

/// Response of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Merge request header.
    pub mr_header: MrHeader,
    /// Generated summary in Markdown.
    pub summary_markdown: String,
    /// Whether the backend served the summary from its cache.
    pub cached: bool,
    /// When the summary was produced.
    #[serde(with = "timestamp")]
    pub scanned_at: DateTime<Utc>,
}

/// One row of the scan history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHistoryItem {
    /// Scan identifier.
    pub id: i64,
    /// GitLab project identifier.
    pub project_id: i64,
    /// Merge request IID within the project.
    pub mr_iid: i64,
    /// Web URL of the merge request.
    pub mr_url: String,
    /// Merge request title at scan time.
    pub title: String,
    /// When the scan ran.
    #[serde(with = "timestamp")]
    pub scanned_at: DateTime<Utc>,
    /// Whether the stored summary still matches the merge request.
    #[serde(default = "default_up_to_date")]
    pub is_up_to_date: bool,
}

const fn default_up_to_date() -> bool {
    true
}

/// Response of `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// The requested page of scans, newest first.
    pub scans: Vec<ScanHistoryItem>,
    /// Number of scans matching the search across all pages.
    pub total: u64,
}

/// Query parameters for `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryParams {
    /// Search term matched against titles and URLs.
    pub search: Option<String>,
    /// Maximum number of rows to return.
    pub limit: u32,
    /// Number of rows to skip.
    pub offset: u64,
}

impl HistoryParams {
    /// Builds parameters, dropping a blank search term.
    #[must_use]
    pub fn new(search: &str, limit: u32, offset: u64) -> Self {
        let trimmed = search.trim();
        Self {
            search: (!trimmed.is_empty()).then(|| search.to_owned()),
            limit,
            offset,
        }
    }

    /// Renders the parameters as query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

/// Response of `GET /api/history/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDetails {
    /// Scan identifier.
    pub id: i64,
    /// GitLab project identifier.
    pub project_id: i64,
    /// Merge request IID within the project.
    pub mr_iid: i64,
    /// Web URL of the merge request.
    pub mr_url: String,
    /// Merge request title at scan time.
    pub title: String,
    /// Stored summary in Markdown.
    pub summary_markdown: String,
    /// Head commit the summary was generated for.
    #[serde(default)]
    pub last_commit_sha: Option<String>,
    /// When the scan ran.
    #[serde(with = "timestamp")]
    pub scanned_at: DateTime<Utc>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Backend health label, `healthy` when all is well.
    pub status: String,
}
