//! Session operations: status, login, logout, and the OAuth callback.

use delta::{CallbackPolicy, DeltaApp, DeltaError, DeltaGateway, SessionState};

use super::output::{describe_session, write_stdout};

/// Reports whether the session is signed in.
///
/// # Errors
///
/// Returns [`DeltaError::Io`] when the report cannot be written.
pub async fn status<G: DeltaGateway>(app: &DeltaApp<G>) -> Result<(), DeltaError> {
    let state = app.start().await;
    write_stdout(&describe_session(&state))
}

/// Points the user at the backend sign-in page.
pub fn login<G: DeltaGateway>(app: &DeltaApp<G>) {
    app.session().login();
}

/// Ends the session. Local state is cleared even when the backend fails.
///
/// # Errors
///
/// Returns [`DeltaError::Authentication`] when the backend rejects the
/// logout.
pub async fn logout<G: DeltaGateway>(app: &DeltaApp<G>) -> Result<(), DeltaError> {
    app.session().logout().await
}

/// Confirms the sign-in after the OAuth provider redirected back.
///
/// # Errors
///
/// Returns [`DeltaError::Authentication`] when the session could not be
/// confirmed.
pub async fn callback<G: DeltaGateway>(app: &DeltaApp<G>) -> Result<(), DeltaError> {
    match app.session().complete_login(&CallbackPolicy::default()).await {
        state @ SessionState::Authenticated(_) => write_stdout(&describe_session(&state)),
        SessionState::Loading | SessionState::Unauthenticated => Err(DeltaError::Authentication {
            message: "sign-in could not be confirmed".to_owned(),
        }),
    }
}
