//! Inbound adapters driving the gateway.
//!
//! - **cli**: clap command surface used by the `ideation` binary

pub mod cli;
