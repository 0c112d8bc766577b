//! Replay window for signed requests.

use crate::error::AuthError;

/// Default tolerated clock skew, in seconds.
pub const DEFAULT_REPLAY_WINDOW_SECS: u64 = 300;

/// Symmetric freshness window around the current time.
///
/// A timestamp `ts` is fresh when `|now - ts| <= window`; the boundary itself
/// is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayWindow {
    window_secs: u64,
}

impl Default for ReplayWindow {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_WINDOW_SECS)
    }
}

impl ReplayWindow {
    /// Create a window tolerating `window_secs` of skew in either direction.
    #[must_use]
    pub const fn new(window_secs: u64) -> Self {
        Self { window_secs }
    }

    /// The configured window in seconds.
    #[must_use]
    pub const fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// Parse a raw `x-timestamp` value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTimestamp`] unless `raw` is a decimal integer.
    pub fn parse_timestamp(raw: &str) -> Result<i64, AuthError> {
        raw.parse::<i64>().map_err(|_| AuthError::InvalidTimestamp)
    }

    /// Check that `timestamp` lies within the window around `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TimestampOutOfWindow`] if the skew exceeds the window.
    pub fn check(&self, timestamp: i64, now: i64) -> Result<(), AuthError> {
        // Widen so that extreme values cannot overflow.
        let skew = (i128::from(now) - i128::from(timestamp)).unsigned_abs();
        if skew > u128::from(self.window_secs) {
            Err(AuthError::TimestampOutOfWindow)
        } else {
            Ok(())
        }
    }
}
