//! The authentication gate.
//!
//! [`authenticate`] evaluates one request against the [`AuthConfig`] and
//! returns a single [`AuthDecision`]. The evaluation order is fixed:
//!
//! 1. Public path prefixes bypass every check.
//! 2. If an HMAC secret is configured and `x-signature` is present, the
//!    signature decides. A bad signature is final; there is no fallback to
//!    the static key.
//! 3. Otherwise the static key decides. With no static key configured the
//!    request is admitted and the decision is flagged as open.
//!
//! The function is pure: it performs no I/O, reads no clock and mutates
//! nothing, so identical inputs always yield identical decisions.

use std::fmt;

use tracing::debug;

use crate::canonical::SigningContext;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::replay::ReplayWindow;
use crate::signature::verify_signature;
use crate::static_key::StaticKeyValidator;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the base64 HMAC signature.
pub const SIGNATURE_HEADER: &str = "x-signature";
/// Header carrying the signing timestamp in decimal seconds.
pub const TIMESTAMP_HEADER: &str = "x-timestamp";

/// The mechanism that admitted (or was attempted for) a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
    /// No mechanism ran; the path is public.
    None,
    /// Static `x-api-key` comparison.
    StaticKey,
    /// HMAC request signature.
    Hmac,
}

impl Mechanism {
    /// Lowercase name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::StaticKey => "static_key",
            Self::Hmac => "hmac",
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of authenticating one request.
///
/// For rejections, [`mechanism`](Self::mechanism) names the mechanism that
/// was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDecision {
    authenticated: bool,
    mechanism: Mechanism,
    open: bool,
    failure: Option<AuthError>,
}

impl AuthDecision {
    /// The path is public; nothing was checked.
    #[must_use]
    pub const fn public() -> Self {
        Self {
            authenticated: true,
            mechanism: Mechanism::None,
            open: false,
            failure: None,
        }
    }

    /// `mechanism` verified the request against a configured secret.
    #[must_use]
    pub const fn verified(mechanism: Mechanism) -> Self {
        Self {
            authenticated: true,
            mechanism,
            open: false,
            failure: None,
        }
    }

    /// `mechanism` admitted the request because it has no secret configured.
    #[must_use]
    pub const fn open(mechanism: Mechanism) -> Self {
        Self {
            authenticated: true,
            mechanism,
            open: true,
            failure: None,
        }
    }

    /// `mechanism` rejected the request.
    #[must_use]
    pub const fn rejected(mechanism: Mechanism, reason: AuthError) -> Self {
        Self {
            authenticated: false,
            mechanism,
            open: false,
            failure: Some(reason),
        }
    }

    /// Whether the request may proceed.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The mechanism that admitted or rejected the request.
    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }

    /// Whether the request was admitted only because no secret is configured.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<AuthError> {
        self.failure
    }
}

/// Borrowed view of the request fields the gate reads.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    /// HTTP method.
    pub method: &'a http::Method,
    /// Request path without the query string.
    pub path: &'a str,
    /// Request headers (case-insensitive lookup).
    pub headers: &'a http::HeaderMap,
    /// Fully buffered raw body.
    pub body: &'a [u8],
}

impl<'a> AuthRequest<'a> {
    /// Build a view from request parts and the buffered body.
    #[must_use]
    pub fn from_parts(parts: &'a http::request::Parts, body: &'a [u8]) -> Self {
        Self {
            method: &parts.method,
            path: parts.uri.path(),
            headers: &parts.headers,
            body,
        }
    }
}

/// Decide whether a request may reach business logic.
///
/// `now` is the current time in seconds since the Unix epoch.
///
/// # Examples
///
/// ```
/// use satgate_auth::{AuthConfig, AuthError, Mechanism, authenticate};
/// use satgate_auth::gate::AuthRequest;
///
/// let config = AuthConfig::builder().static_key_secret("dev-key-123").build();
/// let (parts, ()) = http::Request::builder()
///     .uri("/v1/satellites")
///     .header("x-api-key", "wrong")
///     .body(())
///     .unwrap()
///     .into_parts();
///
/// let decision = authenticate(&AuthRequest::from_parts(&parts, b""), &config, 0);
/// assert!(!decision.is_authenticated());
/// assert_eq!(decision.failure(), Some(AuthError::InvalidOrMissingApiKey));
/// assert_eq!(decision.mechanism(), Mechanism::StaticKey);
/// ```
#[must_use]
pub fn authenticate(request: &AuthRequest<'_>, config: &AuthConfig, now: i64) -> AuthDecision {
    if config.is_public_path(request.path) {
        debug!(path = request.path, "public path, skipping authentication");
        return AuthDecision::public();
    }

    if let Some(secret) = config.hmac_secret() {
        if let Some(signature) = request.headers.get(SIGNATURE_HEADER) {
            // A present signature commits the request to HMAC.
            let signature = signature.to_str().unwrap_or_default();
            return match verify_hmac(request, signature, secret, config.replay_window(), now) {
                Ok(()) => AuthDecision::verified(Mechanism::Hmac),
                Err(reason) => AuthDecision::rejected(Mechanism::Hmac, reason),
            };
        }
    }

    let validator = StaticKeyValidator::new(config.static_key_secret());
    let provided = request
        .headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match validator.validate(provided) {
        Ok(()) if validator.is_configured() => AuthDecision::verified(Mechanism::StaticKey),
        Ok(()) => AuthDecision::open(Mechanism::StaticKey),
        Err(reason) => AuthDecision::rejected(Mechanism::StaticKey, reason),
    }
}

/// Run the signed-request checks in order: timestamp format, freshness, signature.
fn verify_hmac(
    request: &AuthRequest<'_>,
    signature: &str,
    secret: &str,
    window: ReplayWindow,
    now: i64,
) -> Result<(), AuthError> {
    let raw_timestamp = request
        .headers
        .get(TIMESTAMP_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::InvalidTimestamp)?;

    let timestamp = ReplayWindow::parse_timestamp(raw_timestamp)?;
    window.check(timestamp, now)?;

    let ctx = SigningContext::new(
        request.method.as_str(),
        request.path,
        raw_timestamp,
        request.body,
    );
    verify_signature(secret, &ctx.canonical_string(), signature)
}
