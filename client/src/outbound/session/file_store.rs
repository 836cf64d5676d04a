//! Session store backed by one file per entry.
//!
//! The session directory is opened once through `cap_std`, so every access
//! stays confined to it. Writes go to a hidden temporary file that is then
//! renamed over the target, so a crash never leaves a half-written token.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::{ambient_authority, fs::Dir};
use serde_json::Value;
use tracing::debug;

use crate::domain::SessionToken;
use crate::domain::ports::{SessionStore, SessionStoreError};

const TOKEN_FILE: &str = "auth_token";
const CURRENT_USER_FILE: &str = "current_user";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// [`SessionStore`] persisting entries under a private directory.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
    path: PathBuf,
}

impl FileSessionStore {
    /// Open the session directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|error| io_error("create", path, &error))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|error| io_error("open", path, &error))?;
        Ok(Self {
            dir,
            path: path.to_path_buf(),
        })
    }

    /// Directory holding the session files.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entry(&self, name: &str) -> Result<Option<String>, SessionStoreError> {
        match self.dir.read_to_string(name) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(io_error("read", &self.path.join(name), &error)),
        }
    }

    fn write_entry(&self, name: &str, contents: &[u8]) -> Result<(), SessionStoreError> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{name}.tmp.{}.{counter}", std::process::id());
        self.dir
            .write(&tmp_name, contents)
            .map_err(|error| io_error("write", &self.path.join(&tmp_name), &error))?;
        if let Err(error) = self.dir.rename(&tmp_name, &self.dir, name) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(io_error("replace", &self.path.join(name), &error));
        }
        debug!(entry = name, "session entry written");
        Ok(())
    }

    fn remove_entry(&self, name: &str) -> Result<(), SessionStoreError> {
        match self.dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error("remove", &self.path.join(name), &error)),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<SessionToken>, SessionStoreError> {
        self.read_entry(TOKEN_FILE)?
            .map(|raw| {
                SessionToken::new(raw)
                    .map_err(|error| SessionStoreError::corrupt(TOKEN_FILE, error.to_string()))
            })
            .transpose()
    }

    fn set_token(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.write_entry(TOKEN_FILE, token.as_str().as_bytes())
    }

    fn clear_token(&self) -> Result<(), SessionStoreError> {
        self.remove_entry(TOKEN_FILE)
    }

    fn current_user(&self) -> Result<Option<Value>, SessionStoreError> {
        self.read_entry(CURRENT_USER_FILE)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|error| {
                    SessionStoreError::corrupt(CURRENT_USER_FILE, error.to_string())
                })
            })
            .transpose()
    }

    fn set_current_user(&self, user: &Value) -> Result<(), SessionStoreError> {
        let contents = serde_json::to_vec(user)
            .map_err(|error| SessionStoreError::corrupt(CURRENT_USER_FILE, error.to_string()))?;
        self.write_entry(CURRENT_USER_FILE, &contents)
    }

    fn clear_current_user(&self) -> Result<(), SessionStoreError> {
        self.remove_entry(CURRENT_USER_FILE)
    }
}

fn io_error(action: &str, path: &Path, error: &io::Error) -> SessionStoreError {
    SessionStoreError::io(format!("failed to {action} {}: {error}", path.display()))
}
