//! SatGate Server - authenticating front door for the Satcom telemetry API.
//!
//! Every request passes the authentication gate once: public paths bypass
//! it, signed requests are verified with HMAC-SHA256, and everything else
//! must present the static API key.
//!
//! # Usage
//!
//! ```text
//! API_KEY=dev-key-123 API_SIGNING_SECRET=s3cr3t satgate-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `API_KEY` | *(unset)* | Static key expected in `x-api-key` |
//! | `API_SIGNING_SECRET` | *(unset)* | Shared HMAC signing secret |
//! | `API_SIGNING_SKEW_SECONDS` | `300` | Replay window for signed requests |
//! | `PUBLIC_PATH_PREFIXES` | `/swagger,/health,/healthz,/favicon.ico` | Unauthenticated prefixes |
//! | `MAX_BODY_SIZE` | `10485760` | Largest request body buffered |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod handler;

use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use satgate_auth::{AuthConfig, SystemClock};
use satgate_core::GatewayConfig;
use satgate_http::{GateHttpConfig, GateHttpService};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::handler::TelemetryApiHandler;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`GateHttpConfig`] shared by every connection.
fn build_http_config(gateway: &GatewayConfig, auth: AuthConfig) -> GateHttpConfig {
    GateHttpConfig {
        auth: Arc::new(auth),
        clock: Arc::new(SystemClock),
        max_body_size: gateway.max_body_size,
    }
}

/// Log the authentication posture without revealing secrets.
fn log_auth_posture(auth: &AuthConfig) {
    info!(
        static_key = auth.static_key_secret().is_some(),
        hmac = auth.hmac_secret().is_some(),
        replay_window_secs = auth.replay_window().window_secs(),
        public_path_prefixes = ?auth.public_path_prefixes(),
        "authentication configured",
    );

    if auth.hmac_secret().is_none() {
        warn!("no signing secret configured, request signatures are not verified");
    }
    if auth.is_fully_open() {
        warn!("no API key or signing secret configured, every request is admitted");
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(
    listener: TcpListener,
    service: GateHttpService<TelemetryApiHandler>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Perform a health check by connecting to the gateway and requesting `/health`.
///
/// Succeeds if the response is 200 OK and reports `"status":"ok"`.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"ok\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let gateway_config = GatewayConfig::from_env();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = gateway_config
            .gateway_listen
            .replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&gateway_config.log_level)?;

    let auth_config = AuthConfig::from_env();
    log_auth_posture(&auth_config);

    let addr = gateway_config.listen_addr()?;
    let http_config = build_http_config(&gateway_config, auth_config);
    let service = GateHttpService::new(Arc::new(TelemetryApiHandler), http_config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        max_body_size = gateway_config.max_body_size,
        version = VERSION,
        "starting SatGate Server",
    );

    serve(listener, service).await
}
