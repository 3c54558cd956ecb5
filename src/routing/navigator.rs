//! Page transitions.

use url::Url;

use super::route::Route;

/// Performs page transitions on behalf of client components.
pub trait Navigator: Send + Sync {
    /// Moves to another page of the client.
    fn navigate(&self, route: Route);

    /// Leaves the client for an external URL (full-page navigation).
    fn open_external(&self, url: &Url);
}

/// A navigation performed through a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// In-client transition.
    Route(Route),
    /// Full-page navigation away from the client.
    External(Url),
}

/// Navigator that records every transition.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: std::sync::Mutex<Vec<NavigationEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingNavigator {
    /// All navigations so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// In-client routes visited so far.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NavigationEvent::Route(route) => Some(route),
                NavigationEvent::External(_) => None,
            })
            .collect()
    }

    /// The most recent in-client route.
    #[must_use]
    pub fn last_route(&self) -> Option<Route> {
        self.routes().pop()
    }

    /// External URLs opened so far.
    #[must_use]
    pub fn external_urls(&self) -> Vec<Url> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NavigationEvent::External(url) => Some(url),
                NavigationEvent::Route(_) => None,
            })
            .collect()
    }

    fn push(&self, event: NavigationEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.push(NavigationEvent::Route(route));
    }

    fn open_external(&self, url: &Url) {
        self.push(NavigationEvent::External(url.clone()));
    }
}
