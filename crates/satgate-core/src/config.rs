//! Process configuration for SatGate binaries.
//!
//! All configuration is driven by environment variables. Authentication
//! secrets live in `satgate_auth::AuthConfig`; this type only covers the
//! transport-level settings.

use std::net::SocketAddr;

use tracing::warn;

use crate::error::{SatgateError, SatgateResult};

/// Default body buffering limit (10 MiB).
const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Global configuration for a SatGate server process.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Bind address for the gateway.
    pub gateway_listen: String,
    /// Log level.
    pub log_level: String,
    /// Maximum number of request body bytes buffered before authentication.
    pub max_body_size: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateway_listen: "0.0.0.0:8080".to_owned(),
            log_level: "info".to_owned(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults. A `MAX_BODY_SIZE` that is not a
    /// positive integer is ignored with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("MAX_BODY_SIZE") {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_body_size = n,
                _ => warn!(value = %v, "ignoring invalid MAX_BODY_SIZE"),
            }
        }

        config
    }

    /// Parse the configured listen address.
    pub fn listen_addr(&self) -> SatgateResult<SocketAddr> {
        self.gateway_listen.parse().map_err(|e| {
            SatgateError::Config(format!(
                "invalid bind address {}: {e}",
                self.gateway_listen
            ))
        })
    }
}
