//! Boundary client for the DELTA backend.
//!
//! Every network call the client makes goes through a [`DeltaGateway`]. The
//! production implementation is [`HttpGateway`], which carries the session
//! cookie on every request; [`GuardedGateway`] layers the global
//! unauthorised-response policy on top of any gateway.

mod endpoint;
mod error;
mod error_mapping;
mod gateway;
mod http;
mod interceptor;
mod models;
#[cfg(any(test, feature = "test-support"))]
mod stub;
mod timestamp;

pub use endpoint::{ApiBase, SESSION_COOKIE};
pub use error::DeltaError;
#[cfg(test)]
pub use gateway::MockDeltaGateway;
pub use gateway::DeltaGateway;
pub use self::http::{HttpGateway, HttpGatewayOptions};
pub use interceptor::{GuardedGateway, UnauthorizedHandler};
pub use models::{
    AnalyzeRequest, AnalyzeResponse, AuthStatus, HealthStatus, HistoryParams, HistoryResponse,
    MrHeader, ScanDetails, ScanHistoryItem, UserProfile,
};
#[cfg(any(test, feature = "test-support"))]
pub use stub::StubGateway;
