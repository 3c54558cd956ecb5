//! Session manager operations.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::state::SessionState;
use super::store::SessionStore;
use crate::api::{DeltaError, DeltaGateway};
use crate::context::ViewContext;
use crate::notify::Notification;
use crate::routing::Route;
use crate::telemetry::TelemetryEvent;

const LOGOUT_SUCCESS_MESSAGE: &str = "Logged out successfully";
const LOGOUT_FAILURE_MESSAGE: &str = "Failed to logout";
const LOGIN_SUCCESS_MESSAGE: &str = "Successfully logged in!";
const LOGIN_FAILURE_MESSAGE: &str = "Authentication failed. Please try again.";

/// Re-validation schedule used after the OAuth provider redirects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackPolicy {
    /// Number of status checks before giving up. Zero behaves like one.
    pub attempts: u32,
    /// Pause after the first unsuccessful check.
    pub initial_delay: Duration,
    /// Upper bound for the doubling pause.
    pub max_delay: Duration,
}

impl Default for CallbackPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl CallbackPolicy {
    /// Pauses taken between consecutive checks.
    #[must_use]
    pub fn pauses(&self) -> Vec<Duration> {
        let mut pauses = Vec::new();
        let mut next = self.initial_delay.min(self.max_delay);
        for _ in 1..self.attempts.max(1) {
            pauses.push(next);
            next = next.saturating_mul(2).min(self.max_delay);
        }
        pauses
    }
}

/// Owns the session lifecycle: status checks, login, logout, and the OAuth
/// callback.
pub struct SessionManager<G> {
    gateway: G,
    store: SessionStore,
    context: ViewContext,
    login_url: Url,
    check_lock: Mutex<()>,
}

impl<G> SessionManager<G>
where
    G: DeltaGateway,
{
    /// Creates a manager writing to `store`.
    #[must_use]
    pub fn new(gateway: G, store: SessionStore, context: ViewContext, login_url: Url) -> Self {
        Self {
            gateway,
            store,
            context,
            login_url,
            check_lock: Mutex::new(()),
        }
    }

    /// The store this manager writes to.
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Asks the backend whether the session cookie is valid.
    ///
    /// Any failure resolves the session as unauthenticated. Concurrent calls
    /// run one at a time.
    pub async fn check_auth(&self) -> SessionState {
        let _serialised = self.check_lock.lock().await;
        self.store.begin_loading();

        let state = match self.gateway.auth_status().await {
            Ok(status) => SessionState::from_status(status),
            Err(error) => {
                warn!(%error, "auth status check failed; treating session as signed out");
                SessionState::Unauthenticated
            }
        };

        self.context.record(TelemetryEvent::SessionResolved {
            authenticated: state.is_authenticated(),
        });
        self.store.resolve(state.clone());
        state
    }

    /// Leaves the client for the backend sign-in page.
    pub fn login(&self) {
        info!(url = %self.login_url, "redirecting to sign-in");
        self.context.navigator().open_external(&self.login_url);
    }

    /// Ends the session.
    ///
    /// Local state is cleared whether or not the backend call succeeds; a
    /// failed backend call is reported but never keeps the user signed in.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Authentication`] when the backend call fails.
    pub async fn logout(&self) -> Result<(), DeltaError> {
        let result = self.gateway.logout().await;
        self.store.clear();

        match &result {
            Ok(()) => self
                .context
                .notifier()
                .notify(Notification::success(LOGOUT_SUCCESS_MESSAGE)),
            Err(error) => {
                warn!(%error, "logout failed; local session cleared anyway");
                self.context
                    .notifier()
                    .notify(Notification::error(LOGOUT_FAILURE_MESSAGE));
            }
        }
        result
    }

    /// Completes sign-in after the OAuth provider redirects back.
    ///
    /// Re-checks the session on the policy's schedule until it is
    /// authenticated, then moves to the analysis page. Gives up with an
    /// error notification and a move to the login page.
    pub async fn complete_login(&self, policy: &CallbackPolicy) -> SessionState {
        let mut pauses = policy.pauses().into_iter();
        let mut attempt: u32 = 1;
        loop {
            let state = self.check_auth().await;
            if state.is_authenticated() {
                info!(attempt, "sign-in confirmed");
                self.context
                    .notifier()
                    .notify(Notification::success(LOGIN_SUCCESS_MESSAGE));
                self.context.navigator().navigate(Route::Analysis);
                return state;
            }

            let Some(pause) = pauses.next() else {
                warn!(attempt, "sign-in could not be confirmed");
                self.context
                    .notifier()
                    .notify(Notification::error(LOGIN_FAILURE_MESSAGE));
                self.context.navigator().navigate(Route::Login);
                return state;
            };

            debug!(attempt, ?pause, "session not yet authenticated; retrying");
            tokio::time::sleep(pause).await;
            attempt = attempt.saturating_add(1);
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
