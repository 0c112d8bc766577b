//! Canonical string construction for HMAC request signing.
//!
//! The canonical string is the exact byte sequence both the client and the
//! server feed into HMAC-SHA256:
//!
//! ```text
//! METHOD\n
//! PATH\n
//! TIMESTAMP\n
//! BODY_SHA256_HEX
//! ```
//!
//! `METHOD` is upper-cased, `PATH` excludes the query string, `TIMESTAMP` is
//! the decimal string exactly as sent in `x-timestamp`, and there is no
//! trailing newline.

use crate::digest::hash_body;

/// Per-request inputs to the canonical string.
///
/// Lives only for the duration of one verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext<'a> {
    /// HTTP method as received (normalized when rendered).
    pub method: &'a str,
    /// Request path without the query string.
    pub path: &'a str,
    /// Timestamp string exactly as received.
    pub timestamp: &'a str,
    /// Lowercase hex SHA-256 of the raw body.
    pub body_digest: String,
}

impl<'a> SigningContext<'a> {
    /// Build a context, hashing `body` on the way.
    #[must_use]
    pub fn new(method: &'a str, path: &'a str, timestamp: &'a str, body: &[u8]) -> Self {
        Self {
            method,
            path,
            timestamp,
            body_digest: hash_body(body),
        }
    }

    /// Render the canonical string for this context.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        build_canonical_string(self.method, self.path, self.timestamp, &self.body_digest)
    }
}

/// Build the canonical string from its components.
///
/// # Examples
///
/// ```
/// use satgate_auth::canonical::build_canonical_string;
///
/// let canonical = build_canonical_string("post", "/v1/telemetry", "1700000000", "abc");
/// assert_eq!(canonical, "POST\n/v1/telemetry\n1700000000\nabc");
/// ```
#[must_use]
pub fn build_canonical_string(
    method: &str,
    path: &str,
    timestamp: &str,
    body_digest: &str,
) -> String {
    let method = method.to_ascii_uppercase();
    format!("{method}\n{path}\n{timestamp}\n{body_digest}")
}
