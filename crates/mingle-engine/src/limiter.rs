// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sliding-window rate limiter.
//!
//! Tracks timestamps of one budget-limited action kind over a trailing
//! 1-hour window. Entries older than the window are pruned from the front
//! before every answer; the deque is insertion-ordered hence already
//! time-ordered. The struct itself is pure over explicit `now` values
//! (`_at` variants); persistence of the window is the scheduler's job and
//! happens after every mutation via [`snapshot_json`](SlidingWindowLimiter::snapshot_json).

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mingle_core::MingleError;
use tracing::debug;

/// Length of the trailing window.
fn window() -> chrono::Duration {
    chrono::Duration::hours(1)
}

/// Per-action-kind sliding-window limiter.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    budget: u32,
    timestamps: VecDeque<DateTime<Utc>>,
}

impl SlidingWindowLimiter {
    /// Create an empty limiter allowing `budget` actions per trailing hour.
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            timestamps: VecDeque::new(),
        }
    }

    /// Rebuild a limiter from a persisted JSON snapshot.
    ///
    /// Entries already outside the window relative to `now` are dropped
    /// immediately so a long-stopped process does not resume with a stale
    /// saturated window.
    pub fn restore_json(
        budget: u32,
        json: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, MingleError> {
        let timestamps: Vec<DateTime<Utc>> = serde_json::from_str(json)
            .map_err(|e| MingleError::Internal(format!("invalid limiter snapshot: {e}")))?;
        let mut limiter = Self {
            budget,
            timestamps: timestamps.into(),
        };
        limiter.prune(now);
        debug!(remaining = limiter.timestamps.len(), "limiter window restored");
        Ok(limiter)
    }

    /// Serialize the current window for persistence.
    pub fn snapshot_json(&self) -> String {
        let timestamps: Vec<&DateTime<Utc>> = self.timestamps.iter().collect();
        // Vec<DateTime> serialization cannot fail.
        serde_json::to_string(&timestamps).unwrap_or_else(|_| "[]".to_string())
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = now - window();
        while let Some(front) = self.timestamps.front() {
            if *front <= cutoff {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Whether another action fits in the window ending at `now`.
    pub fn can_act_at(&mut self, now: DateTime<Utc>) -> bool {
        self.prune(now);
        (self.timestamps.len() as u32) < self.budget
    }

    /// Record one action at `now`.
    pub fn record_at(&mut self, now: DateTime<Utc>) {
        self.prune(now);
        self.timestamps.push_back(now);
    }

    /// How long until the next slot opens, measured from `now`.
    ///
    /// Zero when the limiter is not saturated. When saturated, the slot
    /// opens once the oldest remaining timestamp ages out of the window.
    pub fn time_until_slot_at(&mut self, now: DateTime<Utc>) -> Duration {
        if self.can_act_at(now) {
            return Duration::ZERO;
        }
        // Saturated, so the front exists.
        let oldest = self.timestamps.front().copied().unwrap_or(now);
        (oldest + window() - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Wall-clock convenience for [`can_act_at`](Self::can_act_at).
    pub fn can_act(&mut self) -> bool {
        self.can_act_at(Utc::now())
    }

    /// Wall-clock convenience for [`record_at`](Self::record_at).
    pub fn record(&mut self) {
        self.record_at(Utc::now());
    }

    /// Wall-clock convenience for [`time_until_slot_at`](Self::time_until_slot_at).
    pub fn time_until_slot(&mut self) -> Duration {
        self.time_until_slot_at(Utc::now())
    }

    /// Number of timestamps currently inside the window ending at `now`.
    pub fn used_at(&mut self, now: DateTime<Utc>) -> u32 {
        self.prune(now);
        self.timestamps.len() as u32
    }

    /// Drop all recorded timestamps. Used by `stop()`, which clears the
    /// in-memory window without touching the persisted copy.
    pub fn clear(&mut self) {
        self.timestamps.clear();
    }
}
