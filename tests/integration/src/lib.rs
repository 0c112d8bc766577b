//! End-to-end tests for the SatGate authentication gate.
//!
//! Each test spawns an in-process gateway on an ephemeral port, backed by an
//! echo handler that reports how the request was admitted, and talks to it
//! over real HTTP with `reqwest`.
//!
//! ```text
//! cargo test -p satgate-integration
//! ```

mod test_hmac;
mod test_public_paths;
mod test_static_key;

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use bytes::Bytes;
use http::StatusCode;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use satgate_auth::{AuthConfig, AuthDecision, Clock, RequestSigner, SystemClock};
use satgate_http::response::json_response;
use satgate_http::{GateHttpConfig, GateHttpService, GatewayBody, RequestHandler};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Handler that echoes the admitted body and the deciding mechanism.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler;

impl RequestHandler for EchoHandler {
    fn handle(
        &self,
        req: http::Request<Bytes>,
    ) -> Pin<Box<dyn Future<Output = http::Response<GatewayBody>> + Send>> {
        let decision = req.extensions().get::<AuthDecision>().copied();
        let path = req.uri().path().to_owned();
        let body = String::from_utf8_lossy(req.body()).into_owned();

        Box::pin(async move {
            json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "path": path,
                    "mechanism": decision.map(|d| d.mechanism().as_str()),
                    "open": decision.is_some_and(|d| d.is_open()),
                    "body": body,
                }),
            )
        })
    }
}

/// A gateway running in the background of the current test runtime.
#[derive(Debug)]
pub struct TestGateway {
    addr: SocketAddr,
    client: reqwest::Client,
}

impl TestGateway {
    /// Spawn a gateway with the given authentication settings.
    pub async fn spawn(auth: AuthConfig) -> Result<Self> {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let config = GateHttpConfig {
            auth: Arc::new(auth),
            ..GateHttpConfig::default()
        };
        let service = GateHttpService::new(Arc::new(EchoHandler), config);

        tokio::spawn(async move {
            let http = HttpConnBuilder::new(TokioExecutor::new());
            while let Ok((stream, _)) = listener.accept().await {
                let conn = http
                    .serve_connection(TokioIo::new(stream), service.clone())
                    .into_owned();
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        tracing::debug!(error = %e, "test connection error");
                    }
                });
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
        })
    }

    /// Absolute URL for `path_and_query` on this gateway.
    #[must_use]
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{path_and_query}", self.addr)
    }

    /// Start building a request against this gateway.
    #[must_use]
    pub fn request(
        &self,
        method: reqwest::Method,
        path_and_query: &str,
    ) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path_and_query))
    }

    /// Build a request signed for `path` at the current time.
    #[must_use]
    pub fn signed(
        &self,
        secret: &str,
        method: reqwest::Method,
        path: &str,
        body: &'static [u8],
    ) -> reqwest::RequestBuilder {
        self.signed_at(secret, method, path, body, SystemClock.now_secs())
    }

    /// Build a request signed for `path` at `timestamp`.
    #[must_use]
    pub fn signed_at(
        &self,
        secret: &str,
        method: reqwest::Method,
        path: &str,
        body: &'static [u8],
        timestamp: i64,
    ) -> reqwest::RequestBuilder {
        let headers = RequestSigner::new(secret).sign(method.as_str(), path, body, timestamp);
        self.request(method, path)
            .header("x-timestamp", headers.timestamp)
            .header("x-signature", headers.signature)
            .body(body)
    }
}

/// Read the `error` field of a JSON rejection.
pub async fn error_message(resp: reqwest::Response) -> String {
    let json: serde_json::Value = resp.json().await.unwrap_or_default();
    json["error"].as_str().unwrap_or_default().to_owned()
}
