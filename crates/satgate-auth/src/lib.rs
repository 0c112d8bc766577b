//! Request authentication for the Satcom telemetry API.
//!
//! Every inbound request passes through [`authenticate`] exactly once. Two
//! independent mechanisms are supported:
//!
//! - **Static key**: the `x-api-key` header must equal a configured secret.
//! - **HMAC signing**: `x-signature` carries
//!   `base64(HMAC-SHA256(secret, METHOD\nPATH\nTIMESTAMP\nSHA256_HEX(body)))`
//!   and `x-timestamp` must lie within a replay window around the current time.
//!
//! A configured HMAC secret plus a present signature commits the request to
//! the HMAC path; an invalid signature never falls back to the static key.
//! Paths under the public prefixes skip both. A mechanism without a secret is
//! disabled, and if neither is configured every request is admitted (and
//! flagged as open).
//!
//! # Usage
//!
//! ```rust
//! use satgate_auth::{AuthConfig, Mechanism, RequestSigner, authenticate};
//! use satgate_auth::gate::AuthRequest;
//!
//! let config = AuthConfig::builder().hmac_secret("s3cr3t").build();
//! let signed = RequestSigner::new("s3cr3t").sign("POST", "/v1/telemetry", b"{}", 1_700_000_000);
//!
//! let (parts, ()) = http::Request::builder()
//!     .method("POST")
//!     .uri("/v1/telemetry")
//!     .header("x-timestamp", &signed.timestamp)
//!     .header("x-signature", &signed.signature)
//!     .body(())
//!     .unwrap()
//!     .into_parts();
//!
//! let decision = authenticate(&AuthRequest::from_parts(&parts, b"{}"), &config, 1_700_000_000);
//! assert!(decision.is_authenticated());
//! assert_eq!(decision.mechanism(), Mechanism::Hmac);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical string construction
//! - [`clock`] - Injectable time sources
//! - [`config`] - Authentication configuration and public path allow-list
//! - [`digest`] - Request body hashing
//! - [`error`] - Rejection reasons
//! - [`gate`] - The orchestrating gate and its decision type
//! - [`replay`] - Replay window policy
//! - [`signature`] - HMAC computation, constant-time comparison and client-side signing
//! - [`static_key`] - Static API key validation

pub mod canonical;
pub mod clock;
pub mod config;
pub mod digest;
pub mod error;
pub mod gate;
pub mod replay;
pub mod signature;
pub mod static_key;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AuthConfig;
pub use error::AuthError;
pub use gate::{AuthDecision, Mechanism, authenticate};
pub use replay::ReplayWindow;
pub use signature::{RequestSigner, SignedHeaders};
pub use static_key::StaticKeyValidator;
