//! Forced-reset signal for the application shell.
//!
//! The gateway only reports that the session was rejected. This adapter
//! turns that into a generation counter the shell watches; every bump means
//! "discard in-memory state and start over from the login screen".

use tokio::sync::watch;
use tracing::info;

use crate::domain::ports::{AuthRejection, AuthRejectionReaction};

/// [`AuthRejectionReaction`] that broadcasts a reset generation.
#[derive(Debug)]
pub struct ReloadSignal {
    sender: watch::Sender<u64>,
}

impl ReloadSignal {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(0);
        Self { sender }
    }

    /// Receiver that observes every later reset.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    /// Number of resets requested so far.
    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthRejectionReaction for ReloadSignal {
    fn session_rejected(&self, rejection: &AuthRejection) {
        self.sender.send_modify(|generation| *generation += 1);
        info!(
            status = rejection.status,
            endpoint = %rejection.endpoint,
            generation = self.generation(),
            "forced session reset requested"
        );
    }
}
