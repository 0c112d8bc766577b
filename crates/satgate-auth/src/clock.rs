//! Time sources for replay-window checks.
//!
//! The gate never reads the wall clock itself; callers pass `now` in. The HTTP
//! layer obtains it from a [`Clock`], which tests replace with [`FixedClock`].

use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies the current time as whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now_secs(&self) -> i64;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock that returns a settable instant.
///
/// # Examples
///
/// ```
/// use satgate_auth::clock::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_700_000_000);
/// assert_eq!(clock.now_secs(), 1_700_000_000);
/// clock.advance(30);
/// assert_eq!(clock.now_secs(), 1_700_000_030);
/// ```
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Create a clock frozen at `now` seconds.
    #[must_use]
    pub const fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::Relaxed);
    }

    /// Move the clock forward (or backward, for negative values) by `secs`.
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_report_plausible_system_time() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_secs() > 1_577_836_800);
    }

    #[test]
    fn test_should_set_and_advance_fixed_clock() {
        let clock = FixedClock::new(100);
        clock.advance(-40);
        assert_eq!(clock.now_secs(), 60);
        clock.set(5);
        assert_eq!(clock.now_secs(), 5);
    }
}
