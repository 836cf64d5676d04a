//! Driven port for reacting to a rejected session.
//!
//! Detection is pure and lives in the gateway; what the host application does
//! about it (reload the shell, show a login screen, nothing at all in tests)
//! is injected through this port.

/// Details of a response that rejected the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRejection {
    /// HTTP status, 401 or 403.
    pub status: u16,
    /// Endpoint that was rejected, relative to the API base URL.
    pub endpoint: String,
}

/// Port invoked once per rejected response, after the session was cleared.
#[cfg_attr(test, mockall::automock)]
pub trait AuthRejectionReaction: Send + Sync {
    /// Handle a rejected session.
    fn session_rejected(&self, rejection: &AuthRejection);
}

/// Reaction that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuthRejection;

impl AuthRejectionReaction for NoOpAuthRejection {
    fn session_rejected(&self, _rejection: &AuthRejection) {}
}
