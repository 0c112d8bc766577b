//! Authenticating HTTP service layer for the Satcom API gateway.
//!
//! This crate puts the authentication gate in front of an arbitrary
//! downstream handler:
//!
//! - **Body**: the type-erased response body shared by every handler
//! - **Handler trait**: the boundary between the gate and business logic
//! - **Service**: hyper `Service` that buffers the request body, authenticates
//!   once, and either forwards or answers `401`
//! - **Response helpers**: JSON success and error responses

pub mod body;
pub mod dispatch;
pub mod response;
pub mod service;

pub use body::GatewayBody;
pub use dispatch::{NotImplementedHandler, RequestHandler};
pub use service::{GateHttpConfig, GateHttpService};
