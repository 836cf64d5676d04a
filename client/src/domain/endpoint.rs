//! Base URL handling for the backend API.

use std::fmt;

use url::Url;

use super::error::ApiError;

/// Validated absolute base URL, such as `https://host/api`.
///
/// ## Invariants
/// - Scheme is `http` or `https`.
/// - No trailing slash, query, or fragment, so endpoints can be appended
///   verbatim.
///
/// # Examples
/// ```
/// use ideation_client::domain::ApiBaseUrl;
///
/// let base = ApiBaseUrl::parse("https://ideas.example/api/").unwrap();
/// assert_eq!(base.as_str(), "https://ideas.example/api");
/// assert_eq!(base.health_url().as_str(), "https://ideas.example/health");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl {
    raw: String,
    url: Url,
}

impl ApiBaseUrl {
    /// Parse and normalise a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the value is not an absolute
    /// HTTP(S) URL or carries a query or fragment.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|error| {
            ApiError::invalid_request(format!("invalid API base URL '{raw}': {error}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::invalid_request(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::invalid_request(
                "API base URL must not carry a query or fragment",
            ));
        }
        Ok(Self {
            raw: trimmed.to_owned(),
            url,
        })
    }

    /// Normalised base URL without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolve an endpoint such as `/ideas/42/comments`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the endpoint does not start
    /// with `/` or does not form a valid URL.
    pub fn join(&self, endpoint: &str) -> Result<Url, ApiError> {
        if !endpoint.starts_with('/') {
            return Err(ApiError::invalid_request(format!(
                "endpoint '{endpoint}' must start with '/'"
            )));
        }
        Url::parse(&format!("{}{endpoint}", self.raw)).map_err(|error| {
            ApiError::invalid_request(format!("invalid endpoint '{endpoint}': {error}"))
        })
    }

    /// Health check URL: the base with a trailing `/api` segment removed,
    /// followed by `/health`.
    pub fn health_url(&self) -> Url {
        let mut url = self.url.clone();
        let path = url.path().trim_end_matches('/');
        let root = path.strip_suffix("/api").unwrap_or(path);
        let health_path = format!("{root}/health");
        url.set_path(&health_path);
        url
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
