// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock action executor for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mingle_core::{
    ActionExecutor, ActionKind, AdapterType, CandidateItem, HealthStatus, MingleError,
    PlatformAdapter,
};

/// Scripted outcome for one `execute()` call.
#[derive(Debug, Clone)]
pub enum ExecOutcome {
    /// Executor reports success.
    Success,
    /// Executor reports a clean non-success (`Ok(false)`).
    Refused,
    /// Executor fails with an error.
    Error(String),
}

/// One captured `execute()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedAction {
    pub item_id: String,
    pub kind: ActionKind,
    pub comment: Option<String>,
}

/// A mock executor with scripted outcomes and captured calls.
///
/// Outcomes are consumed front-to-back; once the script runs out every
/// call succeeds. Only calls whose outcome is `Success` are recorded as
/// executed, mirroring how the scheduler treats non-success.
pub struct MockExecutor {
    outcomes: Arc<Mutex<VecDeque<ExecOutcome>>>,
    calls: Arc<Mutex<Vec<ExecutedAction>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue outcomes for upcoming `execute()` calls.
    pub async fn script(&self, outcomes: Vec<ExecOutcome>) {
        self.outcomes.lock().await.extend(outcomes);
    }

    /// All `execute()` calls observed, in order, regardless of outcome.
    pub async fn calls(&self) -> Vec<ExecutedAction> {
        self.calls.lock().await.clone()
    }

    /// Count of observed `execute()` calls.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for MockExecutor {
    fn name(&self) -> &str {
        "mock-executor"
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
impl ActionExecutor for MockExecutor {
    async fn execute(
        &self,
        item: &CandidateItem,
        kind: ActionKind,
        comment: Option<&str>,
    ) -> Result<bool, MingleError> {
        self.calls.lock().await.push(ExecutedAction {
            item_id: item.id.clone(),
            kind,
            comment: comment.map(str::to_string),
        });
        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or(ExecOutcome::Success);
        match outcome {
            ExecOutcome::Success => Ok(true),
            ExecOutcome::Refused => Ok(false),
            ExecOutcome::Error(message) => Err(MingleError::Executor {
                message,
                source: None,
            }),
        }
    }
}
