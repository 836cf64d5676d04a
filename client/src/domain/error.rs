//! Error taxonomy surfaced by the gateway.
//!
//! Callers branch on the variant: network failures mean the backend was never
//! reached, application failures mean it answered with a non-success status.
//! Authentication rejections are application failures with status 401 or 403.

use serde_json::Value;

use super::ports::{SessionStoreError, TransportError};

/// Failure returned by every gateway operation except the health check.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No HTTP response was received (DNS, connection refused, timeout).
    #[error("cannot reach server: {message}")]
    Network { message: String },
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Application {
        status: u16,
        message: String,
        details: Value,
    },
    /// A success response carried a body that is not the expected JSON.
    #[error("response decode failed: {message}")]
    Decode { message: String },
    /// The request could not be built (bad endpoint, unencodable payload).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
    /// Durable session storage could not be read or written.
    #[error("session storage failed: {message}")]
    Session { message: String },
}

impl ApiError {
    /// Convenience constructor for [`ApiError::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ApiError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ApiError::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// HTTP status for application failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured details attached to application failures.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Application { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Whether the backend could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Whether the backend rejected the session (401 or 403).
    ///
    /// # Examples
    /// ```
    /// use ideation_client::domain::ApiError;
    /// use serde_json::json;
    ///
    /// let err = ApiError::Application {
    ///     status: 403,
    ///     message: "Forbidden".into(),
    ///     details: json!({ "status": 403 }),
    /// };
    /// assert!(err.is_auth_rejection());
    /// assert!(!ApiError::network("refused").is_auth_rejection());
    /// ```
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Encode { message } => Self::InvalidRequest { message },
            other => Self::network(other.to_string()),
        }
    }
}

impl From<SessionStoreError> for ApiError {
    fn from(value: SessionStoreError) -> Self {
        Self::Session {
            message: value.to_string(),
        }
    }
}
