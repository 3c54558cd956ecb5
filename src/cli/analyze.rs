//! Merge request analysis operation.

use delta::{
    AnalyzeResponse, DeltaApp, DeltaConfig, DeltaError, DeltaGateway, Route, SubmitOutcome,
};

use super::output::{render_analysis, write_stdout};
use super::{not_signed_in, require_signed_in};

/// Summarises the configured merge request.
///
/// # Errors
///
/// Returns [`DeltaError::Configuration`] when no URL is configured,
/// [`DeltaError::Validation`] when the URL is rejected,
/// [`DeltaError::Authentication`] when the user is not signed in, and
/// [`DeltaError::Analysis`] when the backend fails.
pub async fn run<G: DeltaGateway>(
    app: &DeltaApp<G>,
    config: &DeltaConfig,
) -> Result<(), DeltaError> {
    let input = config.require_mr_url()?;
    app.start().await;
    require_signed_in(&app.enter(Route::Analysis))?;

    let outcome = app.analysis().submit(input).await;
    let response = outcome_to_result(outcome)?;
    write_stdout(&render_analysis(&response)?)
}

fn outcome_to_result(outcome: SubmitOutcome) -> Result<AnalyzeResponse, DeltaError> {
    match outcome {
        SubmitOutcome::Completed(response) => Ok(response),
        SubmitOutcome::Rejected(message) => Err(DeltaError::Validation { message }),
        SubmitOutcome::Failed(message) => Err(DeltaError::Analysis { message }),
        SubmitOutcome::Busy => Err(DeltaError::Analysis {
            message: "another analysis is still running".to_owned(),
        }),
        SubmitOutcome::SignedOut => Err(not_signed_in()),
    }
}
