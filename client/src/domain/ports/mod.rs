//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_rejection;
mod http_transport;
mod session_store;

#[cfg(test)]
pub use auth_rejection::MockAuthRejectionReaction;
pub use auth_rejection::{AuthRejection, AuthRejectionReaction, NoOpAuthRejection};
#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
