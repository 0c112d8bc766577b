//! JSON response helpers.
//!
//! Error responses use a single shape:
//!
//! ```json
//! { "error": "Invalid signature" }
//! ```

use http::StatusCode;
use satgate_auth::AuthError;

use crate::body::{self, GatewayBody};

/// Content type for every JSON response produced by the gateway.
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize an error message into the `{ "error": ... }` JSON body.
#[must_use]
pub fn error_to_json(message: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "error": message }))
        .expect("JSON serialization of error cannot fail")
}

/// Build a JSON response with the given status.
#[must_use]
pub fn json_response(status: StatusCode, value: &serde_json::Value) -> http::Response<GatewayBody> {
    let json = serde_json::to_vec(value).expect("JSON serialization of a Value cannot fail");
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .body(body::full(json))
        .expect("valid JSON response")
}

/// Build an error response with the given status and message.
#[must_use]
pub fn error_response(status: StatusCode, message: &str) -> http::Response<GatewayBody> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .body(body::full(error_to_json(message)))
        .expect("valid error response")
}

/// Build the `401 Unauthorized` response for a rejected request.
///
/// Only the reason's client message is returned; secrets, signatures and
/// body content never appear in the response.
#[must_use]
pub fn unauthorized(reason: AuthError) -> http::Response<GatewayBody> {
    error_response(StatusCode::UNAUTHORIZED, &reason.to_string())
}
