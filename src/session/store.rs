//! Single-writer session store.

use tokio::sync::watch;
use tracing::info;

use super::state::SessionState;

/// Owner of the session state.
///
/// Only the session manager and the unauthorised handler write; everything
/// else reads a snapshot or subscribes for changes.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sender: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Creates a store in the [`SessionState::Loading`] state.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(SessionState::Loading);
        Self { sender }
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    pub(crate) fn begin_loading(&self) {
        self.sender.send_replace(SessionState::Loading);
    }

    pub(crate) fn resolve(&self, state: SessionState) {
        info!(authenticated = state.is_authenticated(), "session resolved");
        self.sender.send_replace(state);
    }

    /// Forces the unauthenticated state. Returns whether anything changed.
    pub(crate) fn clear(&self) -> bool {
        self.sender.send_if_modified(|state| {
            if matches!(state, SessionState::Unauthenticated) {
                return false;
            }
            info!("session cleared");
            *state = SessionState::Unauthenticated;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::session::SessionState;

    #[tokio::test]
    async fn subscribers_observe_resolution() {
        let store = SessionStore::new();
        let mut receiver = store.subscribe();

        store.resolve(SessionState::Unauthenticated);
        receiver
            .changed()
            .await
            .expect("store should still be alive");

        assert_eq!(*receiver.borrow(), SessionState::Unauthenticated);
    }

    #[test]
    fn clearing_twice_reports_a_single_change() {
        let store = SessionStore::new();

        assert!(store.clear());
        assert!(!store.clear());
        assert_eq!(store.snapshot(), SessionState::Unauthenticated);
    }

    #[test]
    fn writes_succeed_without_subscribers() {
        let store = SessionStore::new();
        store.begin_loading();
        store.resolve(SessionState::Unauthenticated);

        assert_eq!(store.snapshot(), SessionState::Unauthenticated);
    }
}
