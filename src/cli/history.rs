//! Scan history operations.

use chrono::Utc;

use delta::{DeltaApp, DeltaConfig, DeltaError, DeltaGateway, FetchOutcome, Route};

use super::output::{render_history, render_scan, write_stdout};
use super::{not_signed_in, require_signed_in};

/// Lists one page of the scan history.
///
/// # Errors
///
/// Returns [`DeltaError::Authentication`] when the user is not signed in and
/// propagates the gateway error when the page cannot be loaded.
pub async fn run<G: DeltaGateway>(
    app: &DeltaApp<G>,
    config: &DeltaConfig,
) -> Result<(), DeltaError> {
    app.start().await;
    require_signed_in(&app.enter(Route::History))?;

    let browser = app.open_history();
    let query = config.search.as_deref().unwrap_or_default();
    let outcome = browser.seek(query, config.history_offset).await;
    browser.close();

    match outcome {
        FetchOutcome::Applied => write_stdout(&render_history(&browser.snapshot(), Utc::now())?),
        FetchOutcome::Failed(error) => Err(error),
        FetchOutcome::SignedOut => Err(not_signed_in()),
        FetchOutcome::Stale
        | FetchOutcome::Closed
        | FetchOutcome::Ignored
        | FetchOutcome::Unchanged => Err(DeltaError::Io {
            message: "history page was not loaded".to_owned(),
        }),
    }
}

/// Shows one stored scan.
///
/// # Errors
///
/// Returns [`DeltaError::Configuration`] when no scan identifier is
/// configured and propagates gateway failures.
pub async fn show_scan<G: DeltaGateway>(
    app: &DeltaApp<G>,
    config: &DeltaConfig,
) -> Result<(), DeltaError> {
    let scan_id = config.require_scan_id()?;
    let details = app.scan_details(scan_id).await?;
    write_stdout(&render_scan(&details)?)
}
