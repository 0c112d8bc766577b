//! Error types for request authentication.
//!
//! Every rejection produced by the gate is one of the [`AuthError`] variants.
//! The `Display` text is the human-readable message returned to clients; it
//! never contains secrets, signatures or body content.

/// Reasons a request can fail authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AuthError {
    /// The `x-timestamp` header is missing or is not a decimal integer.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// The timestamp is further from the current time than the replay window allows.
    #[error("Timestamp outside allowed window")]
    TimestampOutOfWindow,

    /// The `x-signature` header does not match the expected HMAC.
    #[error("Invalid signature")]
    SignatureMismatch,

    /// The `x-api-key` header is missing or does not match the configured key.
    #[error("Unauthorized")]
    InvalidOrMissingApiKey,
}

impl AuthError {
    /// Stable machine-readable code for logs and metrics.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidTimestamp => "InvalidTimestamp",
            Self::TimestampOutOfWindow => "TimestampOutOfWindow",
            Self::SignatureMismatch => "SignatureMismatch",
            Self::InvalidOrMissingApiKey => "InvalidOrMissingApiKey",
        }
    }
}
