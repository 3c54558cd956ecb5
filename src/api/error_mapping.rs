//! Error mapping helpers for the HTTP gateway.

use http::StatusCode;

use super::error::DeltaError;

/// Backend operations, used to pick the error variant for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    AuthStatus,
    CurrentUser,
    Logout,
    Analyze,
    History,
    ScanDetails,
    Health,
}

impl Operation {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::AuthStatus => "auth status",
            Self::CurrentUser => "current user",
            Self::Logout => "logout",
            Self::Analyze => "analyze",
            Self::History => "history",
            Self::ScanDetails => "scan details",
            Self::Health => "health check",
        }
    }
}

const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Could not validate credentials";

pub(crate) fn map_http_error(
    operation: Operation,
    status: StatusCode,
    detail: Option<String>,
) -> DeltaError {
    if status == StatusCode::UNAUTHORIZED {
        return DeltaError::Unauthorized {
            message: detail.unwrap_or_else(|| DEFAULT_UNAUTHORIZED_MESSAGE.to_owned()),
        };
    }

    match (operation, detail) {
        (Operation::Analyze, Some(message)) => DeltaError::Analysis { message },
        (Operation::Logout, detail) => DeltaError::Authentication {
            message: format!(
                "logout failed with status {status}: {}",
                detail.as_deref().unwrap_or("unknown error")
            ),
        },
        (_, detail) => DeltaError::Api {
            status: status.as_u16(),
            message: format!(
                "{} failed: {}",
                operation.label(),
                detail.as_deref().unwrap_or("unknown error")
            ),
        },
    }
}

pub(crate) fn map_transport_error(operation: Operation, error: &reqwest::Error) -> DeltaError {
    let message = format!("{} failed: {error}", operation.label());
    match operation {
        Operation::Logout => DeltaError::Authentication { message },
        _ => DeltaError::Network { message },
    }
}

pub(crate) fn map_decode_error(
    operation: Operation,
    status: StatusCode,
    error: &reqwest::Error,
) -> DeltaError {
    DeltaError::Api {
        status: status.as_u16(),
        message: format!("{} response deserialisation failed: {error}", operation.label()),
    }
}

/// Extracts the string `detail` field from a `FastAPI` error body.
///
/// Validation errors carry a list in `detail`; those yield `None` so callers
/// fall back to a generic message.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::{Operation, extract_detail, map_http_error};
    use crate::api::DeltaError;

    #[rstest]
    #[case::analyze(Operation::Analyze)]
    #[case::history(Operation::History)]
    #[case::logout(Operation::Logout)]
    fn unauthorized_wins_for_every_operation(#[case] operation: Operation) {
        let error = map_http_error(operation, StatusCode::UNAUTHORIZED, None);

        assert_eq!(
            error,
            DeltaError::Unauthorized {
                message: "Could not validate credentials".to_owned()
            }
        );
    }

    #[rstest]
    fn analyze_failures_carry_backend_detail() {
        let error = map_http_error(
            Operation::Analyze,
            StatusCode::NOT_FOUND,
            Some("Merge request not found or you don't have access to it.".to_owned()),
        );

        assert_eq!(
            error,
            DeltaError::Analysis {
                message: "Merge request not found or you don't have access to it.".to_owned()
            }
        );
    }

    #[rstest]
    fn analyze_failures_without_detail_are_api_errors() {
        let error = map_http_error(Operation::Analyze, StatusCode::BAD_GATEWAY, None);

        assert!(
            matches!(error, DeltaError::Api { status: 502, .. }),
            "expected Api error, got {error:?}"
        );
    }

    #[rstest]
    fn logout_failures_are_authentication_errors() {
        let error = map_http_error(Operation::Logout, StatusCode::INTERNAL_SERVER_ERROR, None);

        assert!(
            matches!(error, DeltaError::Authentication { .. }),
            "expected Authentication error, got {error:?}"
        );
    }

    #[rstest]
    #[case::string(r#"{"detail": "Failed to generate summary. Please try again."}"#, Some("Failed to generate summary. Please try again."))]
    #[case::validation_list(r#"{"detail": [{"loc": ["body", "url"], "msg": "field required"}]}"#, None)]
    #[case::blank(r#"{"detail": "  "}"#, None)]
    #[case::not_json("Internal Server Error", None)]
    fn extracts_string_details_only(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_detail(body).as_deref(), expected);
    }
}
