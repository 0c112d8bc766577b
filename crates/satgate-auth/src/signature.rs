//! HMAC-SHA256 request signatures.
//!
//! The signature is `base64(HMAC-SHA256(secret, canonical_string))` using the
//! standard, padded base64 alphabet. Verification compares the provided
//! header value against the expected value in constant time.
//!
//! [`RequestSigner`] is the client-side counterpart used by tests and by Rust
//! callers of the API.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::canonical::SigningContext;
use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Compute the base64-encoded HMAC-SHA256 of `canonical` keyed by `secret`.
///
/// The secret is used as its UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use satgate_auth::signature::compute_signature;
///
/// let sig = compute_signature("s3cr3t", "GET\n/\n0\nabc");
/// assert_eq!(sig.len(), 44);
/// ```
#[must_use]
pub fn compute_signature(secret: &str, canonical: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can accept keys of any length");
    mac.update(canonical.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Compare two byte strings without leaking where they differ.
///
/// Both inputs are first reduced to fixed-size SHA-256 digests, so the final
/// comparison always covers 32 bytes and a length mismatch does not return
/// early.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let a = Sha256::digest(a);
    let b = Sha256::digest(b);
    a[..].ct_eq(&b[..]).into()
}

/// Verify `provided` against the signature expected for `canonical`.
///
/// # Errors
///
/// Returns [`AuthError::SignatureMismatch`] if the signatures differ.
pub fn verify_signature(secret: &str, canonical: &str, provided: &str) -> Result<(), AuthError> {
    let expected = compute_signature(secret, canonical);
    if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::SignatureMismatch)
    }
}

/// Header values a client attaches to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value for `x-timestamp`.
    pub timestamp: String,
    /// Value for `x-signature`.
    pub signature: String,
}

/// Signs outgoing requests with a shared secret.
///
/// # Examples
///
/// ```
/// use satgate_auth::signature::RequestSigner;
///
/// let signer = RequestSigner::new("s3cr3t");
/// let headers = signer.sign("POST", "/v1/telemetry", b"{}", 1_700_000_000);
/// assert_eq!(headers.timestamp, "1700000000");
/// assert_eq!(headers.signature, "KqUSzDQE7Hz7Hi7xwnQREXKImojqzCS2VskXzCCROoc=");
/// ```
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"***")
            .finish()
    }
}

impl RequestSigner {
    /// Create a signer for the given shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Produce the `x-timestamp` and `x-signature` values for a request.
    ///
    /// `path` must not include the query string.
    #[must_use]
    pub fn sign(&self, method: &str, path: &str, body: &[u8], timestamp: i64) -> SignedHeaders {
        let timestamp = timestamp.to_string();
        let ctx = SigningContext::new(method, path, &timestamp, body);
        let signature = compute_signature(&self.secret, &ctx.canonical_string());
        SignedHeaders {
            timestamp,
            signature,
        }
    }
}
