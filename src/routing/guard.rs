//! Access control for protected routes.

use tokio::sync::watch;

use super::navigator::Navigator;
use super::route::Route;
use crate::api::UserProfile;
use crate::session::{SessionState, SessionStore};

/// What a route should show for a given session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The session is still loading; show a neutral placeholder.
    Placeholder,
    /// Leave for another route.
    Redirect(Route),
    /// Show the page. Protected pages always receive the user.
    Render {
        /// Signed-in user, when there is one.
        user: Option<UserProfile>,
    },
}

/// Decides what `route` shows for `session`.
#[must_use]
pub fn evaluate(route: Route, session: &SessionState) -> GuardOutcome {
    match (route, session) {
        (Route::Callback, _) => GuardOutcome::Render {
            user: session.user().cloned(),
        },
        (Route::Login, SessionState::Authenticated(_)) => GuardOutcome::Redirect(Route::Analysis),
        (Route::Login, _) => GuardOutcome::Render { user: None },
        (_, SessionState::Loading) => GuardOutcome::Placeholder,
        (_, SessionState::Unauthenticated) => GuardOutcome::Redirect(Route::Login),
        (_, SessionState::Authenticated(user)) => GuardOutcome::Render {
            user: Some(user.clone()),
        },
    }
}

/// Watches the session on behalf of one route.
///
/// The outcome is recomputed on every session change, so a session cleared
/// while a protected page is open turns into a redirect.
#[derive(Debug)]
pub struct RouteGuard {
    route: Route,
    session: watch::Receiver<SessionState>,
}

impl RouteGuard {
    /// Guards `route` using the given store.
    #[must_use]
    pub fn new(route: Route, store: &SessionStore) -> Self {
        Self {
            route,
            session: store.subscribe(),
        }
    }

    /// The guarded route.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Outcome for the current session.
    #[must_use]
    pub fn current(&self) -> GuardOutcome {
        evaluate(self.route, &self.session.borrow())
    }

    /// Waits for the next session change and returns the new outcome.
    ///
    /// Returns `None` once the session store has been dropped.
    pub async fn changed(&mut self) -> Option<GuardOutcome> {
        self.session.changed().await.ok()?;
        Some(evaluate(self.route, &self.session.borrow_and_update()))
    }

    /// Waits until the session has left [`SessionState::Loading`].
    pub async fn settled(&mut self) -> GuardOutcome {
        let route = self.route;
        if let Ok(state) = self.session.wait_for(|session| !session.is_loading()).await {
            return evaluate(route, &state);
        }
        self.current()
    }

    /// Applies the current outcome, following redirects through `navigator`.
    pub fn enter(&self, navigator: &dyn Navigator) -> GuardOutcome {
        let outcome = self.current();
        if let GuardOutcome::Redirect(target) = &outcome {
            navigator.navigate(*target);
        }
        outcome
    }
}
