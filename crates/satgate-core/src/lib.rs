//! Core configuration and error types for the Satcom API gateway.
//!
//! This crate holds the process-level settings every SatGate binary needs
//! (bind address, log filter, body buffering limit) together with the error
//! type used when those settings cannot be turned into something usable.

mod config;
mod error;

pub use config::GatewayConfig;
pub use error::{SatgateError, SatgateResult};
