//! CLI operation mode handlers.
//!
//! Each [`OperationMode`] maps to one handler:
//! - [`session`]: status, login, logout, and the OAuth callback
//! - [`analyze`]: summarise a merge request
//! - [`history`]: list the scan history or show one scan
//! - [`health`]: query the backend health endpoint
//!
//! Views are rendered by [`output`]; [`terminal`] adapts navigation and
//! notifications to the terminal.

use delta::{DeltaApp, DeltaConfig, DeltaError, DeltaGateway, GuardOutcome, OperationMode};

pub mod analyze;
pub mod health;
pub mod history;
pub mod output;
pub mod session;
pub mod terminal;

#[cfg(test)]
pub mod test_utils;

/// Runs the operation selected by `config`.
///
/// # Errors
///
/// Propagates the failure of the selected operation.
pub async fn dispatch<G: DeltaGateway>(
    app: &DeltaApp<G>,
    config: &DeltaConfig,
) -> Result<(), DeltaError> {
    match config.operation_mode() {
        OperationMode::Status => session::status(app).await,
        OperationMode::Login => {
            session::login(app);
            Ok(())
        }
        OperationMode::Logout => session::logout(app).await,
        OperationMode::Callback => session::callback(app).await,
        OperationMode::Analyze => analyze::run(app, config).await,
        OperationMode::History => history::run(app, config).await,
        OperationMode::ScanDetails => history::show_scan(app, config).await,
        OperationMode::Health => health::run(app).await,
    }
}

/// Error returned when a protected operation runs without a session.
#[must_use]
pub fn not_signed_in() -> DeltaError {
    DeltaError::Authentication {
        message: "not signed in; run `delta --login` first".to_owned(),
    }
}

/// Fails unless the guard lets the page render.
///
/// # Errors
///
/// Returns [`not_signed_in`] for redirects and unresolved sessions.
pub fn require_signed_in(outcome: &GuardOutcome) -> Result<(), DeltaError> {
    match outcome {
        GuardOutcome::Render { .. } => Ok(()),
        GuardOutcome::Placeholder | GuardOutcome::Redirect(_) => Err(not_signed_in()),
    }
}
