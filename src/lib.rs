//! DELTA client library: session and request orchestration for the DELTA
//! merge request summariser.
//!
//! The library tracks whether the user is signed in, guards the functional
//! views, submits merge requests for analysis, and pages through the scan
//! history. Every backend call goes through a [`DeltaGateway`]; a 401 from any
//! of them signs the user out client-side and returns them to the login page.

pub mod analysis;
pub mod api;
pub mod app;
pub mod config;
pub mod context;
pub mod history;
pub mod notify;
pub mod routing;
pub mod session;
pub mod telemetry;

pub use analysis::{AnalysisOrchestrator, AnalysisState, MergeRequestUrl, SubmitOutcome};
pub use api::{
    AnalyzeRequest, AnalyzeResponse, ApiBase, AuthStatus, DeltaError, DeltaGateway,
    GuardedGateway, HealthStatus, HistoryParams, HistoryResponse, HttpGateway,
    HttpGatewayOptions, MrHeader, ScanDetails, ScanHistoryItem, UnauthorizedHandler, UserProfile,
};
pub use app::{DeltaApp, SharedGateway};
pub use config::{DeltaConfig, OperationMode};
pub use context::ViewContext;
pub use history::{
    DEFAULT_HISTORY_LIMIT, EmptyState, FetchOutcome, HistoryBrowser, HistorySnapshot, PageWindow,
    relative_age,
};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use routing::{GuardOutcome, NavigationEvent, Navigator, Route, RouteGuard};
pub use session::{CallbackPolicy, SessionEnforcer, SessionManager, SessionState, SessionStore};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
