//! Merge request URL validation.

use std::fmt;

use crate::api::DeltaError;

const EMPTY_URL_MESSAGE: &str = "Please enter a GitLab MR URL";
const INVALID_URL_MESSAGE: &str = "Please enter a valid GitLab merge request URL";

const MERGE_REQUEST_MARKERS: [&str; 2] = ["merge_requests", "merge_request"];

/// User input that looks like a GitLab merge request URL.
///
/// The check is deliberately shallow: the backend does the real parsing and
/// reports its own errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequestUrl(String);

impl MergeRequestUrl {
    /// Validates raw input.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::Validation`] when the input is blank or does not
    /// mention a merge request.
    pub fn parse(input: &str) -> Result<Self, DeltaError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DeltaError::Validation {
                message: EMPTY_URL_MESSAGE.to_owned(),
            });
        }
        if !MERGE_REQUEST_MARKERS
            .iter()
            .any(|marker| trimmed.contains(marker))
        {
            return Err(DeltaError::Validation {
                message: INVALID_URL_MESSAGE.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MergeRequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
