//! Downstream handler trait and dispatch.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::StatusCode;
use satgate_auth::AuthDecision;

use crate::body::GatewayBody;
use crate::response::error_response;

/// Trait that the business logic behind the gate must implement.
///
/// The handler receives an authenticated request whose body has already been
/// buffered; it is the same byte buffer the gate digested. The
/// [`AuthDecision`] that admitted the request is stored in the request
/// extensions for audit logging. This trait is the boundary between the
/// authentication layer and the resource endpoints.
pub trait RequestHandler: Send + Sync + 'static {
    /// Handle an authenticated request and produce an HTTP response.
    fn handle(
        &self,
        req: http::Request<Bytes>,
    ) -> Pin<Box<dyn Future<Output = http::Response<GatewayBody>> + Send>>;
}

/// Dispatch an authenticated request to the handler.
pub async fn dispatch_request<H: RequestHandler>(
    handler: &H,
    req: http::Request<Bytes>,
) -> http::Response<GatewayBody> {
    let mechanism = req
        .extensions()
        .get::<AuthDecision>()
        .map(|d| d.mechanism().as_str());
    tracing::debug!(
        method = %req.method(),
        path = req.uri().path(),
        mechanism,
        "dispatching request"
    );
    handler.handle(req).await
}

/// Default handler that answers `501 Not Implemented` for every request.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl RequestHandler for NotImplementedHandler {
    fn handle(
        &self,
        _req: http::Request<Bytes>,
    ) -> Pin<Box<dyn Future<Output = http::Response<GatewayBody>> + Send>> {
        Box::pin(async { error_response(StatusCode::NOT_IMPLEMENTED, "Not implemented") })
    }
}
