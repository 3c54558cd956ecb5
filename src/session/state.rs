//! Session state.

use crate::api::{AuthStatus, UserProfile};

/// Whether the current user is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// A status check is in flight; nothing is known yet.
    #[default]
    Loading,
    /// The backend accepted the session cookie.
    Authenticated(UserProfile),
    /// No valid session.
    Unauthenticated,
}

impl SessionState {
    /// Interprets a status response.
    ///
    /// The session counts as authenticated only when the backend says so and
    /// also returns the user.
    #[must_use]
    pub fn from_status(status: AuthStatus) -> Self {
        match status {
            AuthStatus {
                authenticated: true,
                user: Some(user),
            } => Self::Authenticated(user),
            AuthStatus { .. } => Self::Unauthenticated,
        }
    }

    /// True while the first status check has not resolved.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True when a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Loading | Self::Unauthenticated => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::SessionState;
    use crate::api::{AuthStatus, UserProfile};

    fn ada() -> UserProfile {
        UserProfile {
            gitlab_user_id: "7".to_owned(),
            username: Some("ada".to_owned()),
            email: None,
        }
    }

    #[rstest]
    #[case::signed_in(AuthStatus::signed_in(ada()), SessionState::Authenticated(ada()))]
    #[case::anonymous(AuthStatus::anonymous(), SessionState::Unauthenticated)]
    #[case::flag_without_user(
        AuthStatus { authenticated: true, user: None },
        SessionState::Unauthenticated
    )]
    #[case::user_without_flag(
        AuthStatus { authenticated: false, user: Some(ada()) },
        SessionState::Unauthenticated
    )]
    fn interprets_status(#[case] status: AuthStatus, #[case] expected: SessionState) {
        assert_eq!(SessionState::from_status(status), expected);
    }

    #[test]
    fn starts_loading() {
        let state = SessionState::default();

        assert!(state.is_loading());
        assert!(state.user().is_none());
    }
}
