//! Error types for the command-line surface.

use thiserror::Error;

use crate::domain::ApiError;

/// Errors surfaced by command execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    /// The backend rejected a session that was active before the command.
    #[error("session expired; please log in again")]
    SessionExpired,
    /// The command needs a signed-in session.
    #[error("not signed in; run `ideation login` first")]
    NotSignedIn,
    /// The health check reported an unhealthy backend.
    #[error("backend unhealthy: {message}")]
    Unhealthy {
        /// Health check message.
        message: String,
    },
    /// Gateway operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Result could not be written.
    #[error("failed to write output: {message}")]
    Output {
        /// Underlying I/O or encoding error.
        message: String,
    },
}

impl CliError {
    /// Classify a gateway failure, given whether a session was active when
    /// the command started.
    pub(crate) fn from_api(error: ApiError, had_session: bool) -> Self {
        if had_session && error.is_auth_rejection() {
            Self::SessionExpired
        } else {
            Self::Api(error)
        }
    }
}
