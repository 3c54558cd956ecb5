//! Backend health check.

use delta::{DeltaApp, DeltaError, DeltaGateway};

use super::output::write_stdout;

const HEALTHY: &str = "healthy";

/// Reports the backend health label.
///
/// # Errors
///
/// Returns [`DeltaError::Api`] when the backend reports anything other than
/// `healthy`, and propagates gateway failures.
pub async fn run<G: DeltaGateway>(app: &DeltaApp<G>) -> Result<(), DeltaError> {
    let health = app.health().await?;
    if health.status != HEALTHY {
        return Err(DeltaError::Api {
            status: 503,
            message: format!("backend reports {}", health.status),
        });
    }
    write_stdout(&format!("DELTA backend is {}", health.status))
}
