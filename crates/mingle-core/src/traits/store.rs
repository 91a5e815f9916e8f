// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! State store trait for the persistence backend.

use async_trait::async_trait;

use crate::error::MingleError;
use crate::traits::adapter::PlatformAdapter;

/// Adapter for the persistent key/value store.
///
/// The store is the durability boundary for ignore registries, the rate
/// limiter window, the keyword cursor, and the counters snapshot. There are
/// no transactional guarantees across keys. Persistence failures are logged
/// by the scheduler and in-memory state stays authoritative for the rest of
/// the live process; a restart may lose only the most recent unwritten
/// increment.
#[async_trait]
pub trait StateStore: PlatformAdapter {
    /// Initializes the backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), MingleError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), MingleError>;

    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, MingleError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), MingleError>;

    /// Removes `key` and its value, if present.
    async fn remove(&self, key: &str) -> Result<(), MingleError>;
}
