//! The authenticating HTTP service implementing hyper's `Service` trait.
//!
//! [`GateHttpService`] processes every request through the same pipeline:
//!
//! 1. Forward public paths straight away, without reading their body
//! 2. Buffer the request body (bounded by `max_body_size`)
//! 3. Authenticate once via [`satgate_auth::authenticate`]
//! 4. Reject with `401` and a JSON reason, or
//! 5. Forward the request, with the buffered body and the [`AuthDecision`]
//!    attached, to the [`RequestHandler`]
//! 6. Add common response headers (`x-request-id`, `server`)

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use satgate_auth::gate::AuthRequest;
use satgate_auth::{AuthConfig, AuthDecision, Clock, SystemClock, authenticate};
use tracing::{debug, warn};

use crate::body::GatewayBody;
use crate::dispatch::{RequestHandler, dispatch_request};
use crate::response::{error_response, unauthorized};

/// Default body buffering limit (10 MiB).
const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Configuration for the authenticating HTTP service.
#[derive(Clone)]
pub struct GateHttpConfig {
    /// Authentication settings shared by all requests.
    pub auth: Arc<AuthConfig>,
    /// Source of the current time for replay-window checks.
    pub clock: Arc<dyn Clock>,
    /// Maximum number of body bytes buffered before authentication.
    pub max_body_size: usize,
}

impl std::fmt::Debug for GateHttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateHttpConfig")
            .field("auth", &self.auth)
            .field("clock", &"...")
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}

impl Default for GateHttpConfig {
    fn default() -> Self {
        Self {
            auth: Arc::new(AuthConfig::default()),
            clock: Arc::new(SystemClock),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Hyper `Service` that authenticates requests before handing them to a
/// [`RequestHandler`].
#[derive(Debug)]
pub struct GateHttpService<H: RequestHandler> {
    handler: Arc<H>,
    config: Arc<GateHttpConfig>,
}

impl<H: RequestHandler> GateHttpService<H> {
    /// Create a new `GateHttpService`.
    pub fn new(handler: Arc<H>, config: GateHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: RequestHandler> Clone for GateHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: RequestHandler> hyper::service::Service<http::Request<Incoming>> for GateHttpService<H> {
    type Response = http::Response<GatewayBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, handler.as_ref(), &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single request through the full pipeline.
///
/// Generic over the request body so the pipeline can be driven without a
/// network connection.
pub async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    config: &GateHttpConfig,
    request_id: &str,
) -> http::Response<GatewayBody>
where
    H: RequestHandler,
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, incoming) = req.into_parts();

    // 1. Public paths never pay for buffering; their body is dropped unread.
    if config.auth.is_public_path(parts.uri.path()) {
        debug!(request_id, path = parts.uri.path(), "public path, skipping authentication");
        drop(incoming);
        return forward(handler, parts, Bytes::new(), AuthDecision::public()).await;
    }

    // 2. Buffer the body so it can be digested and still reach the handler.
    let body = match collect_body(incoming, config.max_body_size).await {
        Ok(body) => body,
        Err(resp) => {
            warn!(
                request_id,
                path = parts.uri.path(),
                status = %resp.status(),
                "failed to buffer request body"
            );
            return resp;
        }
    };

    // 3. Authenticate.
    let now = config.clock.now_secs();
    let decision = authenticate(&AuthRequest::from_parts(&parts, &body), &config.auth, now);

    if let Some(reason) = decision.failure() {
        warn!(
            request_id,
            method = %parts.method,
            path = parts.uri.path(),
            mechanism = %decision.mechanism(),
            reason = reason.code(),
            "request rejected"
        );
        return unauthorized(reason);
    }

    if decision.is_open() {
        debug!(
            request_id,
            path = parts.uri.path(),
            mechanism = %decision.mechanism(),
            "request admitted without credentials, no secret configured"
        );
    } else {
        debug!(
            request_id,
            path = parts.uri.path(),
            mechanism = %decision.mechanism(),
            "request authenticated"
        );
    }

    forward(handler, parts, body, decision).await
}

/// Hand the request to the handler with the decision attached.
async fn forward<H: RequestHandler>(
    handler: &H,
    parts: http::request::Parts,
    body: Bytes,
    decision: AuthDecision,
) -> http::Response<GatewayBody> {
    let mut req = http::Request::from_parts(parts, body);
    req.extensions_mut().insert::<AuthDecision>(decision);
    dispatch_request(handler, req).await
}

/// Collect the body into a single `Bytes` buffer, enforcing `limit`.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, http::Response<GatewayBody>>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
        )),
        Err(e) => {
            debug!(error = %e, "request body read failed");
            Err(error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ))
        }
    }
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<GatewayBody>,
    request_id: &str,
) -> http::Response<GatewayBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry(REQUEST_ID_HEADER).or_insert(hv);
    }

    headers.insert(http::header::SERVER, http::HeaderValue::from_static("SatGate"));

    response
}
