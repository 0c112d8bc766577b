//! Telemetry API handler behind the authentication gate.
//!
//! The resource endpoints themselves are served elsewhere; this handler
//! answers the health probes and reports `501 Not Implemented` for the rest,
//! logging which mechanism admitted each request.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::{Method, StatusCode};
use satgate_auth::AuthDecision;
use satgate_http::GatewayBody;
use satgate_http::dispatch::{NotImplementedHandler, RequestHandler};
use satgate_http::response::json_response;
use tracing::info;

/// Paths that report process liveness.
const HEALTH_PATHS: &[&str] = &["/health", "/healthz"];

/// Handler for requests that passed the gate.
#[derive(Debug, Clone, Default)]
pub struct TelemetryApiHandler;

impl RequestHandler for TelemetryApiHandler {
    fn handle(
        &self,
        req: http::Request<Bytes>,
    ) -> Pin<Box<dyn Future<Output = http::Response<GatewayBody>> + Send>> {
        if is_health_check(req.method(), req.uri().path()) {
            return Box::pin(async {
                json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
            });
        }

        if let Some(decision) = req.extensions().get::<AuthDecision>() {
            info!(
                method = %req.method(),
                path = req.uri().path(),
                mechanism = %decision.mechanism(),
                open = decision.is_open(),
                "request admitted"
            );
        }

        // Resource endpoints live behind a separate service.
        NotImplementedHandler.handle(req)
    }
}

fn is_health_check(method: &Method, path: &str) -> bool {
    (method == Method::GET || method == Method::HEAD) && HEALTH_PATHS.contains(&path)
}
