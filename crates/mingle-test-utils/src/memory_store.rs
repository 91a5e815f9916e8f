// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory state store for restart-simulation tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mingle_core::{AdapterType, HealthStatus, MingleError, PlatformAdapter, StateStore};

/// An in-memory key/value store.
///
/// Clones share the same underlying map, so a test can hand one clone to a
/// scheduler, drop the scheduler to simulate a process restart, and hand
/// another clone to the next scheduler with all persisted state intact.
#[derive(Clone)]
pub struct MemoryStateStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Snapshot of the full map for assertions.
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().await.clone()
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for MemoryStateStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn initialize(&self) -> Result<(), MingleError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), MingleError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, MingleError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), MingleError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), MingleError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
