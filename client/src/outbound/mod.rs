//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed `HttpTransport`
//! - **session**: cap-std backed file `SessionStore`
//! - **reload**: `AuthRejectionReaction` broadcasting a forced reset
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod http;
pub mod reload;
pub mod session;
