//! DELTA CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use delta::{DeltaApp, DeltaConfig, DeltaError, StderrJsonlTelemetrySink, ViewContext};
use ortho_config::OrthoConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

use cli::terminal::{TerminalNavigator, TerminalNotifier};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DeltaError> {
    let config = load_config()?;
    let mut context = ViewContext::new(Arc::new(TerminalNavigator), Arc::new(TerminalNotifier));
    if config.telemetry {
        context = context.with_telemetry(Arc::new(StderrJsonlTelemetrySink));
    }
    let app = DeltaApp::from_config(&config, context)?;
    cli::dispatch(&app, &config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DeltaError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DeltaConfig, DeltaError> {
    DeltaConfig::load().map_err(|error| DeltaError::Configuration {
        message: error.to_string(),
    })
}

/// Logs to stderr, filtered by `RUST_LOG` with `warn` as the default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ignored = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}
