//! Response body type shared by the gate and downstream handlers.

use std::convert::Infallible;
use std::io;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};

/// Type-erased response body.
///
/// Handlers convert whatever they produce into this type so the gate can
/// return their responses and its own error responses uniformly.
pub type GatewayBody = BoxBody<Bytes, io::Error>;

/// Create a [`GatewayBody`] from a buffered payload.
pub fn full(data: impl Into<Bytes>) -> GatewayBody {
    Full::new(data.into())
        .map_err(|never: Infallible| match never {})
        .boxed()
}
