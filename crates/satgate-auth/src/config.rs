//! Authentication configuration.
//!
//! [`AuthConfig`] is loaded once at startup and shared read-only by every
//! request. A mechanism whose secret is absent is disabled rather than
//! treated as an error: without configuration the gate fails open, with
//! configuration it fails closed.
//!
//! | Variable | Fallback | Default |
//! |----------|----------|---------|
//! | `API_KEY` | `ApiKey` | unset |
//! | `API_SIGNING_SECRET` | `ApiSigningSecret`, `ApiSigning__Secret` | unset |
//! | `API_SIGNING_SKEW_SECONDS` | `ApiSigning__SkewSeconds`, `ApiSigningSkewSeconds` | `300` |
//! | `PUBLIC_PATH_PREFIXES` | | `/swagger,/health,/healthz,/favicon.ico` |

use tracing::warn;
use typed_builder::TypedBuilder;

use crate::replay::{DEFAULT_REPLAY_WINDOW_SECS, ReplayWindow};

/// Path prefixes that bypass authentication by default: documentation UI,
/// health probes and the favicon.
pub const DEFAULT_PUBLIC_PATH_PREFIXES: &[&str] =
    &["/swagger", "/health", "/healthz", "/favicon.ico"];

fn default_public_path_prefixes() -> Vec<String> {
    DEFAULT_PUBLIC_PATH_PREFIXES
        .iter()
        .map(|p| (*p).to_owned())
        .collect()
}

/// Process-wide authentication settings.
///
/// # Examples
///
/// ```
/// use satgate_auth::AuthConfig;
///
/// let config = AuthConfig::builder()
///     .static_key_secret("dev-key-123")
///     .build();
/// assert_eq!(config.static_key_secret(), Some("dev-key-123"));
/// assert_eq!(config.hmac_secret(), None);
/// assert_eq!(config.replay_window().window_secs(), 300);
/// assert!(config.is_public_path("/health"));
/// ```
#[derive(Clone, PartialEq, Eq, TypedBuilder)]
pub struct AuthConfig {
    /// Secret expected in `x-api-key`. `None` disables the static key check.
    #[builder(default, setter(strip_option, into))]
    static_key_secret: Option<String>,

    /// Shared HMAC signing secret. `None` disables signature verification.
    #[builder(default, setter(strip_option, into))]
    hmac_secret: Option<String>,

    /// Tolerated clock skew for signed requests, in seconds.
    #[builder(default = DEFAULT_REPLAY_WINDOW_SECS)]
    replay_window_secs: u64,

    /// Path prefixes that bypass authentication entirely.
    #[builder(default = default_public_path_prefixes())]
    public_path_prefixes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "static_key_secret",
                &self.static_key_secret().map(|_| "***"),
            )
            .field("hmac_secret", &self.hmac_secret().map(|_| "***"))
            .field("replay_window_secs", &self.replay_window_secs)
            .field("public_path_prefixes", &self.public_path_prefixes)
            .finish()
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// A non-integer replay window is ignored with a warning and the default
    /// is kept.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.static_key_secret = lookup("API_KEY").or_else(|| lookup("ApiKey"));
        config.hmac_secret = lookup("API_SIGNING_SECRET")
            .or_else(|| lookup("ApiSigningSecret"))
            .or_else(|| lookup("ApiSigning__Secret"));

        if let Some(v) = lookup("API_SIGNING_SKEW_SECONDS")
            .or_else(|| lookup("ApiSigning__SkewSeconds"))
            .or_else(|| lookup("ApiSigningSkewSeconds"))
        {
            match v.trim().parse::<u64>() {
                Ok(secs) => config.replay_window_secs = secs,
                Err(_) => warn!(value = %v, "ignoring invalid replay window, using default"),
            }
        }

        if let Some(v) = lookup("PUBLIC_PATH_PREFIXES") {
            config.public_path_prefixes = parse_prefixes(&v);
        }

        config
    }

    /// The static key secret, if configured and non-blank.
    #[must_use]
    pub fn static_key_secret(&self) -> Option<&str> {
        non_blank(self.static_key_secret.as_deref())
    }

    /// The HMAC secret, if configured and non-empty.
    ///
    /// Unlike the static key, a whitespace-only signing secret is still a
    /// secret and keeps signature verification on.
    #[must_use]
    pub fn hmac_secret(&self) -> Option<&str> {
        self.hmac_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// The replay window policy for signed requests.
    #[must_use]
    pub const fn replay_window(&self) -> ReplayWindow {
        ReplayWindow::new(self.replay_window_secs)
    }

    /// Configured public path prefixes.
    #[must_use]
    pub fn public_path_prefixes(&self) -> &[String] {
        &self.public_path_prefixes
    }

    /// Whether neither mechanism is configured, so every request is admitted.
    #[must_use]
    pub fn is_fully_open(&self) -> bool {
        self.static_key_secret().is_none() && self.hmac_secret().is_none()
    }

    /// Whether `path` falls under one of the public prefixes.
    ///
    /// Matching is ASCII case-insensitive and respects segment boundaries:
    /// `/health` matches `/health` and `/health/live` but not `/healthcheck`.
    #[must_use]
    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_path_prefixes
            .iter()
            .any(|prefix| starts_with_segments(path, prefix))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a comma-separated prefix list, dropping blanks.
fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.starts_with('/') {
                s.to_owned()
            } else {
                format!("/{s}")
            }
        })
        .collect()
}

fn starts_with_segments(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        // "/" alone would make every path public.
        return false;
    }
    let Some(head) = path.get(..prefix.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(prefix)
        && (path.len() == prefix.len() || path.as_bytes()[prefix.len()] == b'/')
}
