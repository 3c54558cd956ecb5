//! Sign-out on unauthorised responses.

use std::sync::Arc;

use tracing::info;

use super::store::SessionStore;
use crate::api::UnauthorizedHandler;
use crate::routing::{Navigator, Route};

/// Signs the user out client-side whenever the backend rejects the session.
pub struct SessionEnforcer {
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl SessionEnforcer {
    /// Creates an enforcer for `store`.
    #[must_use]
    pub fn new(store: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }
}

impl UnauthorizedHandler for SessionEnforcer {
    fn on_unauthorized(&self, operation: &'static str) {
        let changed = self.store.clear();
        info!(operation, changed, "session rejected by backend");
        self.navigator.navigate(Route::Login);
    }
}
