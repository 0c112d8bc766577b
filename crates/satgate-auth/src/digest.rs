//! Request body digest.

use sha2::{Digest, Sha256};

/// SHA-256 digest of the empty byte sequence, hex-encoded.
pub const EMPTY_BODY_DIGEST: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Compute the SHA-256 hash of the raw request body and return it as lowercase hex.
///
/// The exact bytes are hashed; an empty body hashes to [`EMPTY_BODY_DIGEST`].
///
/// # Examples
///
/// ```
/// use satgate_auth::digest::{hash_body, EMPTY_BODY_DIGEST};
///
/// assert_eq!(hash_body(b""), EMPTY_BODY_DIGEST);
/// assert_eq!(
///     hash_body(b"{}"),
///     "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
/// );
/// ```
#[must_use]
pub fn hash_body(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}
