//! Static shared-secret (`x-api-key`) validation.

use crate::error::AuthError;
use crate::signature::constant_time_eq;

/// Checks a supplied API key against the configured secret.
///
/// With no secret configured the validator admits every request; this is the
/// documented development-mode behavior.
#[derive(Clone, Copy)]
pub struct StaticKeyValidator<'a> {
    secret: Option<&'a str>,
}

impl std::fmt::Debug for StaticKeyValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeyValidator")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl<'a> StaticKeyValidator<'a> {
    /// Create a validator. Empty or whitespace-only secrets count as unset.
    #[must_use]
    pub fn new(secret: Option<&'a str>) -> Self {
        Self {
            secret: secret.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Whether a secret is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Validate the supplied header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidOrMissingApiKey`] when a secret is
    /// configured and `provided` is absent or different.
    pub fn validate(&self, provided: Option<&str>) -> Result<(), AuthError> {
        let Some(secret) = self.secret else {
            return Ok(());
        };

        match provided {
            Some(value) if constant_time_eq(value.as_bytes(), secret.as_bytes()) => Ok(()),
            _ => Err(AuthError::InvalidOrMissingApiKey),
        }
    }
}
