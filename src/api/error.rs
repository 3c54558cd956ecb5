//! Error types exposed by the DELTA client.

use thiserror::Error;

/// Errors surfaced while validating input or talking to the DELTA backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeltaError {
    /// Input was rejected locally before any request was sent.
    #[error("{message}")]
    Validation {
        /// User-facing explanation of the rejected input.
        message: String,
    },

    /// The backend answered with 401 for an authenticated call.
    #[error("session is not authorised: {message}")]
    Unauthorized {
        /// Detail returned with the 401 response.
        message: String,
    },

    /// An authentication operation such as logout failed.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Details about the failed operation.
        message: String,
    },

    /// The backend rejected an analysis with a domain error.
    #[error("{message}")]
    Analysis {
        /// Backend-provided `detail` describing the failure.
        message: String,
    },

    /// The backend returned a non-authentication error status.
    #[error("DELTA API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Description of the failure.
        message: String,
    },

    /// Networking failed while calling the backend.
    #[error("network error talking to DELTA: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A URL could not be parsed or joined.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl DeltaError {
    /// Returns true when the error came from a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns the backend-provided message for analysis failures.
    #[must_use]
    pub fn backend_detail(&self) -> Option<&str> {
        match self {
            Self::Analysis { message } => Some(message.as_str()),
            _ => None,
        }
    }
}
