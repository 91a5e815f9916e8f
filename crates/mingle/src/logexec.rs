// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dry-run action executor.
//!
//! Logs every decided action instead of touching a platform. Useful for
//! exercising full sessions against replay fixtures, and for rehearsing a
//! campaign config before wiring a real executor. An optional refusal rate
//! simulates platform-side declines.

use async_trait::async_trait;
use rand::Rng;
use tracing::info;

use mingle_core::{
    ActionExecutor, ActionKind, AdapterType, CandidateItem, HealthStatus, MingleError,
    PlatformAdapter,
};

/// Executor that logs actions and reports success.
pub struct LoggingExecutor {
    refusal_odds: f64,
}

impl LoggingExecutor {
    pub fn new() -> Self {
        Self { refusal_odds: 0.0 }
    }

    /// Decline a fraction of actions at random, `0.0..=1.0`.
    pub fn with_refusal_odds(odds: f64) -> Result<Self, MingleError> {
        if !(0.0..=1.0).contains(&odds) {
            return Err(MingleError::Config(format!(
                "refusal odds must be within 0.0..=1.0, got {odds}"
            )));
        }
        Ok(Self { refusal_odds: odds })
    }
}

impl Default for LoggingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for LoggingExecutor {
    fn name(&self) -> &str {
        "logging"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Executor
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        Ok(())
    }
}

#[async_trait]
impl ActionExecutor for LoggingExecutor {
    async fn execute(
        &self,
        item: &CandidateItem,
        kind: ActionKind,
        comment: Option<&str>,
    ) -> Result<bool, MingleError> {
        if self.refusal_odds > 0.0 && rand::thread_rng().gen_bool(self.refusal_odds) {
            info!(item = %item.id, kind = %kind, "dry-run: action declined");
            return Ok(false);
        }
        match comment {
            Some(text) => {
                info!(item = %item.id, kind = %kind, comment = text, "dry-run: action executed")
            }
            None => info!(item = %item.id, kind = %kind, "dry-run: action executed"),
        }
        Ok(true)
    }
}
