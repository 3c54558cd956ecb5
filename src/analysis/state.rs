//! Analysis display state.

use crate::api::AnalyzeResponse;

/// What the analysis page shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState {
    /// Nothing submitted yet, or the last attempt was abandoned.
    #[default]
    Idle,
    /// Input is being checked.
    Validating,
    /// Waiting for the backend.
    Analyzing,
    /// The backend returned a summary.
    Success(AnalyzeResponse),
    /// The last request failed with this message.
    Error(String),
}

impl AnalysisState {
    /// True while a submission is in progress.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Analyzing)
    }

    /// The displayed result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&AnalyzeResponse> {
        match self {
            Self::Success(response) => Some(response),
            Self::Idle | Self::Validating | Self::Analyzing | Self::Error(_) => None,
        }
    }

    /// The displayed error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Idle | Self::Validating | Self::Analyzing | Self::Success(_) => None,
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The input failed validation; nothing was sent.
    Rejected(String),
    /// Another submission is still running; nothing was sent.
    Busy,
    /// The backend returned a summary.
    Completed(AnalyzeResponse),
    /// The backend call failed with this user-facing message.
    Failed(String),
    /// The session was rejected and the user has been signed out.
    SignedOut,
}
