//! Backend base URL and endpoint paths.

use url::Url;

use super::error::DeltaError;

/// Name of the cookie that carries the backend session.
pub const SESSION_COOKIE: &str = "access_token";

pub(crate) const AUTH_STATUS_PATH: &str = "auth/status";
pub(crate) const AUTH_ME_PATH: &str = "auth/me";
pub(crate) const AUTH_LOGIN_PATH: &str = "auth/login";
pub(crate) const AUTH_LOGOUT_PATH: &str = "auth/logout";
pub(crate) const ANALYZE_PATH: &str = "api/analyze";
pub(crate) const HISTORY_PATH: &str = "api/history";
pub(crate) const HEALTH_PATH: &str = "health";

/// Validated base URL of the DELTA backend.
///
/// The stored URL always ends with `/` so endpoint paths join beneath it,
/// even when the backend is mounted under a path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses and normalises a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::InvalidUrl`] when the value is not an absolute
    /// `http` or `https` URL.
    pub fn parse(raw: &str) -> Result<Self, DeltaError> {
        let trimmed = raw.trim();
        let mut url =
            Url::parse(trimmed).map_err(|error| DeltaError::InvalidUrl(format!("{trimmed}: {error}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DeltaError::InvalidUrl(format!(
                "{trimmed}: API URL must use http or https"
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Borrow the normalised base URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    /// Resolves an endpoint path beneath the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::InvalidUrl`] when the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, DeltaError> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|error| DeltaError::InvalidUrl(format!("{path}: {error}")))
    }

    /// URL that starts the OAuth flow in a browser.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::InvalidUrl`] when the path cannot be joined.
    pub fn login_url(&self) -> Result<Url, DeltaError> {
        self.endpoint(AUTH_LOGIN_PATH)
    }

    /// URL of a single stored scan.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::InvalidUrl`] when the path cannot be joined.
    pub fn scan_url(&self, scan_id: i64) -> Result<Url, DeltaError> {
        self.endpoint(&format!("{HISTORY_PATH}/{scan_id}"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ApiBase;
    use crate::api::DeltaError;

    #[rstest]
    #[case::bare_host("http://localhost:8000", "http://localhost:8000/auth/login")]
    #[case::trailing_slash("http://localhost:8000/", "http://localhost:8000/auth/login")]
    #[case::prefix("https://delta.example.com/backend", "https://delta.example.com/backend/auth/login")]
    fn login_url_joins_beneath_base(#[case] base: &str, #[case] expected: &str) {
        let api = ApiBase::parse(base).expect("base should parse");

        assert_eq!(
            api.login_url().expect("login URL should join").as_str(),
            expected
        );
    }

    #[rstest]
    fn scan_url_includes_identifier() {
        let api = ApiBase::parse("http://localhost:8000").expect("base should parse");

        assert_eq!(
            api.scan_url(17).expect("scan URL should join").as_str(),
            "http://localhost:8000/api/history/17"
        );
    }

    #[rstest]
    #[case::relative("localhost:8000/api")]
    #[case::not_a_url("not a url")]
    #[case::ftp("ftp://files.example.com")]
    fn rejects_unusable_bases(#[case] raw: &str) {
        let result = ApiBase::parse(raw);

        assert!(
            matches!(result, Err(DeltaError::InvalidUrl(_))),
            "expected InvalidUrl for {raw}, got {result:?}"
        );
    }
}
