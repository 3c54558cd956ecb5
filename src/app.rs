//! Application wiring.
//!
//! [`DeltaApp`] owns the session store and builds every component on top of
//! one guarded gateway, so a 401 seen by any of them signs the user out
//! everywhere.

use std::sync::Arc;

use tracing::debug;

use crate::analysis::AnalysisOrchestrator;
use crate::api::{
    ApiBase, DeltaError, DeltaGateway, GuardedGateway, HealthStatus, HttpGateway, ScanDetails,
};
use crate::config::DeltaConfig;
use crate::context::ViewContext;
use crate::history::HistoryBrowser;
use crate::routing::{GuardOutcome, Route, RouteGuard};
use crate::session::{SessionEnforcer, SessionManager, SessionState, SessionStore};

/// Gateway shared by every component of one application.
pub type SharedGateway<G> = Arc<GuardedGateway<G>>;

/// A fully wired client.
pub struct DeltaApp<G> {
    gateway: SharedGateway<G>,
    context: ViewContext,
    session: SessionManager<SharedGateway<G>>,
    analysis: AnalysisOrchestrator<SharedGateway<G>>,
    history_limit: u32,
}

impl<G> DeltaApp<G>
where
    G: DeltaGateway,
{
    /// Wires the components around `gateway`.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::InvalidUrl`] when the sign-in URL cannot be
    /// derived from `base`.
    pub fn new(
        gateway: G,
        base: &ApiBase,
        context: ViewContext,
        history_limit: u32,
    ) -> Result<Self, DeltaError> {
        let store = SessionStore::new();
        let enforcer = SessionEnforcer::new(store.clone(), context.navigator_handle());
        let shared = Arc::new(GuardedGateway::new(gateway, Arc::new(enforcer)));
        let login_url = base.login_url()?;
        debug!(%login_url, history_limit, "wiring DELTA client");

        Ok(Self {
            session: SessionManager::new(Arc::clone(&shared), store, context.clone(), login_url),
            analysis: AnalysisOrchestrator::new(Arc::clone(&shared), context.clone()),
            gateway: shared,
            context,
            history_limit,
        })
    }

    /// Resolves the initial session state.
    pub async fn start(&self) -> SessionState {
        self.session.check_auth().await
    }

    /// Session manager.
    #[must_use]
    pub const fn session(&self) -> &SessionManager<SharedGateway<G>> {
        &self.session
    }

    /// Session store, for subscriptions.
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        self.session.store()
    }

    /// Analysis orchestrator.
    #[must_use]
    pub const fn analysis(&self) -> &AnalysisOrchestrator<SharedGateway<G>> {
        &self.analysis
    }

    /// Opens a history view. Each view has its own pagination state.
    #[must_use]
    pub fn open_history(&self) -> HistoryBrowser<SharedGateway<G>> {
        HistoryBrowser::new(
            Arc::clone(&self.gateway),
            self.context.clone(),
            self.history_limit,
        )
    }

    /// Route guard for `route`.
    #[must_use]
    pub fn guard(&self, route: Route) -> RouteGuard {
        RouteGuard::new(route, self.store())
    }

    /// Enters `route`, following the guard's redirect if it issues one.
    #[must_use]
    pub fn enter(&self, route: Route) -> GuardOutcome {
        self.guard(route).enter(self.context.navigator())
    }

    /// Fetches a stored scan.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn scan_details(&self, scan_id: i64) -> Result<ScanDetails, DeltaError> {
        self.gateway.scan_details(scan_id).await
    }

    /// Queries the backend health endpoint.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn health(&self) -> Result<HealthStatus, DeltaError> {
        self.gateway.health().await
    }
}

impl DeltaApp<HttpGateway> {
    /// Builds an HTTP-backed client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Configuration`] when the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn from_config(config: &DeltaConfig, context: ViewContext) -> Result<Self, DeltaError> {
        let base = config.resolve_api_base()?;
        let history_limit = config.history_page_size()?;
        let gateway = HttpGateway::new(base.clone(), config.gateway_options())?;
        Self::new(gateway, &base, context, history_limit)
    }
}
