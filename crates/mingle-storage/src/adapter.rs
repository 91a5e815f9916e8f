// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StateStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use mingle_config::model::StorageConfig;
use mingle_core::{AdapterType, HealthStatus, MingleError, PlatformAdapter, StateStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed state store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily initialized on the first
/// call to [`StateStore::initialize`].
pub struct SqliteStateStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStateStore {
    /// Create a new SqliteStateStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](StateStore::initialize)
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, MingleError> {
        self.db.get().ok_or_else(|| MingleError::Store {
            source: "store not initialized -- call initialize() first".into(),
        })
    }

    /// List all stored keys. Used by the read-only status view.
    pub async fn list_keys(&self) -> Result<Vec<String>, MingleError> {
        queries::state::list_keys(self.db()?).await
    }
}

#[async_trait]
impl PlatformAdapter for SqliteStateStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn initialize(&self) -> Result<(), MingleError> {
        let db = Database::open_with_wal(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| MingleError::Store {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite state store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), MingleError> {
        self.db()?.close().await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, MingleError> {
        queries::state::get(self.db()?, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), MingleError> {
        queries::state::set(self.db()?, key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), MingleError> {
        queries::state::remove(self.db()?, key).await
    }
}
