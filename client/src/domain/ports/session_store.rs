//! Driven port for durable session state.
//!
//! Mirrors a browser's local storage: one entry for the bearer token and one
//! for the cached current-user record. Access is synchronous because every
//! write happens between suspension points of the calling task.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::define_port_error;
use crate::domain::session::SessionToken;

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStoreError {
        /// The backing medium could not be read or written.
        Io { message: String } =>
            "session storage I/O failed: {message}",
        /// A stored entry exists but cannot be decoded.
        Corrupt { key: String, message: String } =>
            "session entry '{key}' is corrupt: {message}",
    }
}

/// Accessor interface over the persisted session.
///
/// ## Contract
/// - After `set_token(t)`, `token()` yields `t`.
/// - After `clear_token()`, the entry is gone, not blank. Clearing an absent
///   entry succeeds.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Persisted token, if any.
    fn token(&self) -> Result<Option<SessionToken>, SessionStoreError>;
    /// Persist a token, replacing any previous one.
    fn set_token(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
    /// Remove the persisted token.
    fn clear_token(&self) -> Result<(), SessionStoreError>;
    /// Cached current-user record, if any.
    fn current_user(&self) -> Result<Option<Value>, SessionStoreError>;
    /// Cache the current-user record.
    fn set_current_user(&self, user: &Value) -> Result<(), SessionStoreError>;
    /// Remove the cached current-user record.
    fn clear_current_user(&self) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Default)]
struct MemoryEntries {
    token: Option<SessionToken>,
    current_user: Option<Value>,
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<MemoryEntries>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token.
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            entries: Mutex::new(MemoryEntries {
                token: Some(token),
                current_user: None,
            }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, MemoryEntries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn token(&self) -> Result<Option<SessionToken>, SessionStoreError> {
        Ok(self.entries().token.clone())
    }

    fn set_token(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.entries().token = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionStoreError> {
        self.entries().token = None;
        Ok(())
    }

    fn current_user(&self) -> Result<Option<Value>, SessionStoreError> {
        Ok(self.entries().current_user.clone())
    }

    fn set_current_user(&self, user: &Value) -> Result<(), SessionStoreError> {
        self.entries().current_user = Some(user.clone());
        Ok(())
    }

    fn clear_current_user(&self) -> Result<(), SessionStoreError> {
        self.entries().current_user = None;
        Ok(())
    }
}
