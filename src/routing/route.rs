//! Application routes.

use std::fmt;

/// A page of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in page.
    Login,
    /// OAuth callback landing page.
    Callback,
    /// Merge request analysis page.
    Analysis,
    /// Scan history page.
    History,
}

impl Route {
    /// Every route, in navigation order.
    pub const ALL: [Self; 4] = [Self::Login, Self::Callback, Self::Analysis, Self::History];

    /// Path the route is served under.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Callback => "/callback",
            Self::Analysis => "/analysis",
            Self::History => "/history",
        }
    }

    /// Resolves a path to a route. The root path resolves to [`Route::Login`].
    ///
    /// Trailing slashes are ignored; unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Self::Login);
        }
        Self::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Whether the route requires an authenticated session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Analysis | Self::History)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
