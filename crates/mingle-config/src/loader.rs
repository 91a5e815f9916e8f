// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mingle.toml` > `~/.config/mingle/mingle.toml` > `/etc/mingle/mingle.toml`
//! with environment variable overrides via `MINGLE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MingleConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mingle/mingle.toml` (system-wide)
/// 3. `~/.config/mingle/mingle.toml` (user XDG config)
/// 4. `./mingle.toml` (local directory)
/// 5. `MINGLE_*` environment variables
pub fn load_config() -> Result<MingleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MingleConfig::default()))
        .merge(Toml::file("/etc/mingle/mingle.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("mingle/mingle.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("mingle.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MingleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MingleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MingleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MingleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MINGLE_SESSION_MIN_DELAY_SECS` must
/// map to `session.min_delay_secs`, not `session.min.delay.secs`.
fn env_provider() -> Env {
    Env::prefixed("MINGLE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MINGLE_SESSION_TOTAL_ITEM_CAP -> "session_total_item_cap"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("session_", "session.", 1)
            .replacen("actions_", "actions.", 1)
            .replacen("filters_", "filters.", 1)
            .replacen("campaign_", "campaign.", 1)
            .replacen("composer_", "composer.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
