//! Client configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! From lowest to highest:
//!
//! 1. **Defaults** – built-in values
//! 2. **Configuration file** – `.delta.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `DELTA_API_URL`, `DELTA_SESSION_TOKEN`, ...
//!    (the API URL also falls back to `VITE_API_URL`)
//! 4. **Command-line arguments** – `--api-url`, `--mr-url`, `--history`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://delta.example.com"
//! session_token = "eyJhbGciOi..."
//! request_timeout_seconds = 60
//! history_limit = 50
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{ApiBase, DeltaError, HttpGatewayOptions};
use crate::history::DEFAULT_HISTORY_LIMIT;

/// Backend used when no URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable consulted when `api_url` is unset.
pub const LEGACY_API_URL_ENV: &str = "VITE_API_URL";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const MAX_HISTORY_LIMIT: u32 = 100;

/// Operation selected by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Report whether the session is signed in.
    Status,
    /// Open the backend sign-in page.
    Login,
    /// End the session.
    Logout,
    /// Confirm sign-in after the OAuth redirect.
    Callback,
    /// Summarise a merge request.
    Analyze,
    /// Browse the scan history.
    History,
    /// Show one stored scan.
    ScanDetails,
    /// Query the backend health endpoint.
    Health,
}

/// Client configuration supporting CLI, environment, and file sources.
///
/// Boolean flags are read from the CLI and configuration files only;
/// ortho-config does not load booleans from the environment.
///
/// # Example
///
/// ```no_run
/// use delta::DeltaConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DeltaConfig::load().expect("failed to load configuration");
/// let base = config.resolve_api_base().expect("API URL should be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "DELTA",
    discovery(
        dotfile_name = ".delta.toml",
        config_file_name = "delta.toml",
        app_name = "delta"
    )
)]
pub struct DeltaConfig {
    /// Base URL of the DELTA backend.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `DELTA_API_URL` or `VITE_API_URL` (legacy)
    /// - Config file: `api_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Value of the `access_token` session cookie.
    ///
    /// Can be provided via:
    /// - CLI: `--session-token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `DELTA_SESSION_TOKEN`
    /// - Config file: `session_token = "..."`
    #[ortho_config(cli_short = 't')]
    pub session_token: Option<String>,

    /// Transport timeout for each request, in seconds. Defaults to 30.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Merge request to summarise.
    ///
    /// Can be provided via:
    /// - CLI: `--mr-url <URL>` or `-u <URL>`
    /// - Environment: `DELTA_MR_URL`
    #[ortho_config(cli_short = 'u')]
    pub mr_url: Option<String>,

    /// Search text for the history view.
    #[ortho_config(cli_short = 's')]
    pub search: Option<String>,

    /// History page size, between 1 and 100. Defaults to 20.
    #[ortho_config()]
    pub history_limit: u32,

    /// Index of the first history row to show.
    #[ortho_config()]
    pub history_offset: u64,

    /// Stored scan to display.
    #[ortho_config()]
    pub scan_id: Option<i64>,

    /// Shows the scan history.
    #[ortho_config()]
    pub history: bool,

    /// Reports the session state.
    #[ortho_config()]
    pub status: bool,

    /// Opens the backend sign-in page.
    #[ortho_config()]
    pub login: bool,

    /// Ends the session.
    #[ortho_config()]
    pub logout: bool,

    /// Confirms sign-in after the OAuth provider redirects back.
    #[ortho_config()]
    pub callback: bool,

    /// Queries the backend health endpoint.
    #[ortho_config()]
    pub health: bool,

    /// Writes telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            session_token: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            mr_url: None,
            search: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_offset: 0,
            scan_id: None,
            history: false,
            status: false,
            login: false,
            logout: false,
            callback: false,
            health: false,
            telemetry: false,
        }
    }
}

impl DeltaConfig {
    /// Resolves the backend base URL.
    ///
    /// Falls back to `VITE_API_URL` and then to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Configuration`] when the URL is not an absolute
    /// HTTP(S) URL.
    pub fn resolve_api_base(&self) -> Result<ApiBase, DeltaError> {
        let raw = self
            .api_url
            .clone()
            .or_else(|| env::var(LEGACY_API_URL_ENV).ok())
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        ApiBase::parse(&raw).map_err(|error| DeltaError::Configuration {
            message: format!("invalid API URL `{raw}`: {error}"),
        })
    }

    /// Transport timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Options for the HTTP gateway.
    #[must_use]
    pub fn gateway_options(&self) -> HttpGatewayOptions {
        HttpGatewayOptions {
            timeout: self.request_timeout(),
            session_token: self.session_token.clone(),
        }
    }

    /// Returns the history page size.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Configuration`] unless the size is between 1 and
    /// 100.
    pub fn history_page_size(&self) -> Result<u32, DeltaError> {
        if (1..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            Ok(self.history_limit)
        } else {
            Err(DeltaError::Configuration {
                message: format!(
                    "history limit must be between 1 and {MAX_HISTORY_LIMIT} (got {})",
                    self.history_limit
                ),
            })
        }
    }

    /// Returns the merge request URL.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Configuration`] when no URL is configured.
    pub fn require_mr_url(&self) -> Result<&str, DeltaError> {
        self.mr_url
            .as_deref()
            .ok_or_else(|| DeltaError::Configuration {
                message: "merge request URL is required (use --mr-url or -u)".to_owned(),
            })
    }

    /// Returns the scan identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Configuration`] when no identifier is configured.
    pub fn require_scan_id(&self) -> Result<i64, DeltaError> {
        self.scan_id.ok_or_else(|| DeltaError::Configuration {
            message: "scan identifier is required (use --scan-id)".to_owned(),
        })
    }

    /// Determines the operation to run.
    ///
    /// Explicit action flags win over inferred modes. A merge request URL
    /// selects analysis, a scan identifier selects scan details, and a search
    /// or `--history` selects the history view. Otherwise the session status
    /// is reported.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.health {
            OperationMode::Health
        } else if self.login {
            OperationMode::Login
        } else if self.logout {
            OperationMode::Logout
        } else if self.callback {
            OperationMode::Callback
        } else if self.status {
            OperationMode::Status
        } else if self.mr_url.is_some() {
            OperationMode::Analyze
        } else if self.scan_id.is_some() {
            OperationMode::ScanDetails
        } else if self.history || self.search.is_some() {
            OperationMode::History
        } else {
            OperationMode::Status
        }
    }
}

#[cfg(test)]
mod tests;
