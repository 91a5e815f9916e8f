// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time source abstraction.
//!
//! The scheduler reads wall-clock time for the rate limiter window and
//! suspends between items. Both go through [`Clock`] so tests can drive
//! simulated time without real sleeps.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

/// Source of "now" and of cooperative suspension.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Suspend for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A manually-advanced clock for tests.
///
/// `sleep` advances the clock by the requested duration instead of
/// suspending, so blocked-waiting scenarios complete instantly while
/// still exercising the limiter's time arithmetic.
#[derive(Debug)]
pub struct ManualClock {
    // Milliseconds since the Unix epoch.
    now_ms: AtomicI64,
}

impl ManualClock {
    /// Start the clock at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now_ms: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Start the clock at the Unix epoch.
    pub fn at_epoch() -> Self {
        Self::new(Utc.timestamp_opt(0, 0).unwrap())
    }

    /// Advance the clock by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.now_ms
            .fetch_add(duration.as_millis() as i64, Ordering::SeqCst);
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.now_ms.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        // Yield so concurrent control tasks get a chance to run.
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn manual_clock_advances_on_sleep() {
        let clock = ManualClock::at_epoch();
        let before = clock.now();
        clock.sleep(Duration::from_secs(3600)).await;
        assert_eq!((clock.now() - before).num_seconds(), 3600);
    }

    #[tokio::test]
    async fn manual_clock_advance_is_explicit() {
        let clock = ManualClock::at_epoch();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now().timestamp_millis(), 250);
    }
}
