//! Typed client for the ideation platform REST backend.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::ClientSettings;
