// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mingle engagement engine.

use thiserror::Error;

/// The primary error type used across all Mingle adapter traits and core operations.
#[derive(Debug, Error)]
pub enum MingleError {
    /// Configuration errors (invalid TOML, missing required fields, no enabled action).
    #[error("configuration error: {0}")]
    Config(String),

    /// State store errors (database connection, query failure, serialization).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Discovery adapter errors (surface unreachable, extraction failure, navigation failure).
    #[error("discovery error: {message}")]
    Discovery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Action executor errors (remote surface rejected or failed the action).
    #[error("executor error: {message}")]
    Executor {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Comment composer errors (generator endpoint failure, empty template pool).
    #[error("composer error: {message}")]
    Composer {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested adapter was not found.
    #[error("adapter not found: {adapter_type}/{name}")]
    AdapterNotFound { adapter_type: String, name: String },

    /// Adapter health check failed.
    #[error("health check failed for {name}: {reason}")]
    HealthCheckFailed { name: String, reason: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
