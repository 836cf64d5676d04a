//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{ApiBaseUrl, ApiError};

/// API base URL baked in at build time, falling back to the hosted backend.
pub const DEFAULT_API_URL: &str = match option_env!("IDEATION_API_URL") {
    Some(url) => url,
    None => "https://api.ideation.invalid/api",
};
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_SESSION_DIR: &str = ".ideation";

/// Configuration values for the gateway and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "IDEATION")]
pub struct ClientSettings {
    /// Backend base URL including the `/api` prefix.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Directory holding the persisted session.
    pub session_dir: Option<PathBuf>,
}

impl ClientSettings {
    /// Return the configured API URL, falling back to the default.
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Return the request timeout. Zero is raised to one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
                .max(1),
        )
    }

    /// Return the session directory, falling back to the default.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Replace the configured API URL when `url` is present.
    #[must_use]
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_url = Some(url);
        }
        self
    }

    /// Parse the configured API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the URL is unusable.
    pub fn base_url(&self) -> Result<ApiBaseUrl, ApiError> {
        ApiBaseUrl::parse(self.api_url())
    }
}
