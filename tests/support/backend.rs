//! Mock DELTA backend and a client wired against it.

use std::sync::Arc;

use delta::notify::RecordingNotifier;
use delta::routing::RecordingNavigator;
use delta::{DeltaApp, DeltaConfig, DeltaError, HttpGateway, ViewContext};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Session token the test client presents.
pub const SESSION_TOKEN: &str = "session-123";

/// A client talking to a mock backend, with recording collaborators.
pub struct TestClient {
    /// Application under test.
    pub app: DeltaApp<HttpGateway>,
    /// Records page transitions.
    pub navigator: Arc<RecordingNavigator>,
    /// Records notifications.
    pub notifier: Arc<RecordingNotifier>,
}

/// Builds a client for `server` with a short page size.
///
/// # Errors
///
/// Returns the wiring error when the client cannot be built.
pub fn client_for(server: &MockServer, history_limit: u32) -> Result<TestClient, DeltaError> {
    let navigator = Arc::new(RecordingNavigator::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let config = DeltaConfig {
        api_url: Some(server.uri()),
        session_token: Some(SESSION_TOKEN.to_owned()),
        request_timeout_seconds: 5,
        history_limit,
        ..DeltaConfig::default()
    };
    let context = ViewContext::new(navigator.clone(), notifier.clone());
    let app = DeltaApp::from_config(&config, context)?;
    Ok(TestClient {
        app,
        navigator,
        notifier,
    })
}

/// Profile JSON for a GitLab user.
pub fn user_json(username: &str) -> Value {
    json!({"gitlab_user_id": "7", "username": username, "email": null})
}

/// One history row.
pub fn scan_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "project_id": 7,
        "mr_iid": id,
        "mr_url": format!("https://gitlab.example.com/group/project/-/merge_requests/{id}"),
        "title": title,
        "scanned_at": "2025-03-01T10:15:00",
        "is_up_to_date": true
    })
}

/// An analysis result for "Add caching".
pub fn analysis_json(cached: bool) -> Value {
    json!({
        "mr_header": {
            "title": "Add caching",
            "author": "Ada Lovelace",
            "status": "Open",
            "url": "https://gitlab.example.com/group/project/-/merge_requests/12"
        },
        "summary_markdown": "## Summary\nAdds a cache.",
        "cached": cached,
        "scanned_at": "2025-03-01T10:15:00"
    })
}

/// Serves `GET /auth/status`, signed in as `username` when given.
pub async fn mount_auth_status(server: &MockServer, username: Option<&str>) {
    let body = username.map_or_else(
        || json!({"authenticated": false, "user": null}),
        |name| json!({"authenticated": true, "user": user_json(name)}),
    );
    Mock::given(method("GET"))
        .and(path("/auth/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answers `verb path` with a 401.
pub async fn mount_unauthorized(server: &MockServer, verb: &str, route: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .mount(server)
        .await;
}

/// Serves `GET /api/history` from `total` generated rows, honouring `limit`
/// and `offset`.
pub async fn mount_paged_history(server: &MockServer, total: u64) {
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(move |request: &Request| {
            let limit = query_value(request, "limit").unwrap_or(20);
            let offset = query_value(request, "offset").unwrap_or(0);
            let end = offset.saturating_add(limit).min(total);
            let scans: Vec<Value> = (offset..end)
                .map(|index| scan_json(index + 1, &format!("Scan {}", index + 1)))
                .collect();
            ResponseTemplate::new(200).set_body_json(json!({"scans": scans, "total": total}))
        })
        .mount(server)
        .await;
}

fn query_value(request: &Request, key: &str) -> Option<u64> {
    request
        .url
        .query_pairs()
        .find(|(name, _)| name == key)
        .and_then(|(_, value)| value.parse().ok())
}
