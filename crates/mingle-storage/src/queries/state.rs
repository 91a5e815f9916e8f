// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value operations over the `session_state` table.

use mingle_core::MingleError;
use rusqlite::params;

use crate::database::Database;

/// Read the value stored under `key`.
pub async fn get(db: &Database, key: &str) -> Result<Option<String>, MingleError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT value FROM session_state WHERE key = ?1")?;
            let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
            match result {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Upsert `value` under `key`, stamping `updated_at`.
pub async fn set(db: &Database, key: &str, value: &str) -> Result<(), MingleError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO session_state (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove `key` and its value, if present.
pub async fn remove(db: &Database, key: &str) -> Result<(), MingleError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM session_state WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all stored keys, ordered. Used by status inspection.
pub async fn list_keys(db: &Database) -> Result<Vec<String>, MingleError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM session_state ORDER BY key")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut keys = Vec::new();
            for row in rows {
                keys.push(row?);
            }
            Ok(keys)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
