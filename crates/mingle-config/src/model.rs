// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Mingle engagement engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use mingle_core::types::{ContentKind, Language};
use serde::{Deserialize, Serialize};

/// Top-level Mingle configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values. The
/// scheduler takes an immutable snapshot of this config at session start.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MingleConfig {
    /// Engine identity and logging settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Session pacing, budgets, and abort thresholds.
    #[serde(default)]
    pub session: SessionConfig,

    /// Which engagement actions are enabled.
    #[serde(default)]
    pub actions: ActionsConfig,

    /// Filter pipeline thresholds and toggles.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Keyword campaign settings.
    #[serde(default)]
    pub campaign: CampaignConfig,

    /// Comment composition settings.
    #[serde(default)]
    pub composer: ComposerConfig,

    /// State store backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Engine identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Display name of this engine instance.
    #[serde(default = "default_engine_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_engine_name() -> String {
    "mingle".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Session pacing, rate budget, and abort threshold configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Comment actions allowed per trailing hour. Reactions are unmetered.
    #[serde(default = "default_hourly_comment_budget")]
    pub hourly_comment_budget: u32,

    /// Minimum delay between two processed items, in seconds.
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: u64,

    /// Maximum delay between two processed items, in seconds.
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,

    /// Campaign-wide cap on processed items. The session stops when the
    /// cumulative total reaches this cap, including across restarts.
    #[serde(default = "default_total_item_cap")]
    pub total_item_cap: u64,

    /// Consecutive quality rejections that abort the session.
    #[serde(default = "default_consecutive_filtered_abort")]
    pub consecutive_filtered_abort: u32,

    /// Consecutive empty discovery passes that abort the session, provided
    /// every currently visible item is already filtered or processed.
    #[serde(default = "default_consecutive_empty_abort")]
    pub consecutive_empty_abort: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hourly_comment_budget: default_hourly_comment_budget(),
            min_delay_secs: default_min_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            total_item_cap: default_total_item_cap(),
            consecutive_filtered_abort: default_consecutive_filtered_abort(),
            consecutive_empty_abort: default_consecutive_empty_abort(),
        }
    }
}

fn default_hourly_comment_budget() -> u32 {
    8
}

fn default_min_delay_secs() -> u64 {
    8
}

fn default_max_delay_secs() -> u64 {
    25
}

fn default_total_item_cap() -> u64 {
    100
}

fn default_consecutive_filtered_abort() -> u32 {
    15
}

fn default_consecutive_empty_abort() -> u32 {
    3
}

/// Action enablement configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ActionsConfig {
    /// Enable the lightweight reaction action.
    #[serde(default = "default_true")]
    pub react: bool,

    /// Enable the comment action (budget-limited).
    #[serde(default)]
    pub comment: bool,

    /// Compatibility switch: with no action enabled, silently fall back to
    /// a single reaction instead of failing validation. Off by default
    /// because the fallback performs an action the operator never enabled.
    #[serde(default)]
    pub legacy_default_action: bool,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            react: true,
            comment: false,
            legacy_default_action: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// How the engagement-threshold filter combines the two metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementMatch {
    /// Pass when either metric is in range (original behavior).
    Any,
    /// Pass only when both metrics are in range.
    All,
}

/// Filter pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    /// Skip items whose id was already acted upon.
    #[serde(default = "default_true")]
    pub content_dedup: bool,

    /// Skip items whose author was already acted upon.
    #[serde(default = "default_true")]
    pub author_dedup: bool,

    /// Maximum ids kept per ignore registry before FIFO eviction.
    #[serde(default = "default_ignore_cap")]
    pub ignore_cap: usize,

    /// Enable the age-window filter.
    #[serde(default)]
    pub age_enabled: bool,

    /// Lower bound of the accepted age window, in hours since publication.
    #[serde(default)]
    pub age_from_hours: f64,

    /// Upper bound of the accepted age window, in hours since publication.
    #[serde(default = "default_age_to_hours")]
    pub age_to_hours: f64,

    /// Content kinds eligible for action. Empty means all kinds pass.
    #[serde(default)]
    pub allowed_kinds: Vec<ContentKind>,

    /// Languages that pass the language filter. Empty means no restriction.
    #[serde(default)]
    pub language_allow: Vec<Language>,

    /// Languages rejected by the language filter.
    #[serde(default)]
    pub language_deny: Vec<Language>,

    /// Require (`true`) or exclude (`false`) a verified-author signal.
    /// `None` disables the check.
    #[serde(default)]
    pub require_verified: Option<bool>,

    /// Require (`true`) or exclude (`false`) a has-avatar signal.
    /// `None` disables the check.
    #[serde(default)]
    pub require_avatar: Option<bool>,

    /// Enable the engagement-threshold filter.
    #[serde(default)]
    pub engagement_enabled: bool,

    /// Lower bound of the accepted engagement range, applied per metric.
    #[serde(default)]
    pub engagement_min: u64,

    /// Upper bound of the accepted engagement range, applied per metric.
    #[serde(default = "default_engagement_max")]
    pub engagement_max: u64,

    /// Whether a single in-range metric suffices or both are required.
    #[serde(default = "default_engagement_match")]
    pub engagement_match: EngagementMatch,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            content_dedup: true,
            author_dedup: true,
            ignore_cap: default_ignore_cap(),
            age_enabled: false,
            age_from_hours: 0.0,
            age_to_hours: default_age_to_hours(),
            allowed_kinds: Vec::new(),
            language_allow: Vec::new(),
            language_deny: Vec::new(),
            require_verified: None,
            require_avatar: None,
            engagement_enabled: false,
            engagement_min: 0,
            engagement_max: default_engagement_max(),
            engagement_match: default_engagement_match(),
        }
    }
}

fn default_ignore_cap() -> usize {
    5_000
}

fn default_age_to_hours() -> f64 {
    24.0
}

fn default_engagement_max() -> u64 {
    1_000_000
}

fn default_engagement_match() -> EngagementMatch {
    EngagementMatch::Any
}

/// Keyword campaign configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignConfig {
    /// Search terms to iterate. Empty disables the keyword campaign and the
    /// session processes the default feed instead.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Items to process per keyword before advancing to the next one.
    #[serde(default = "default_per_keyword_cap")]
    pub per_keyword_cap: u64,

    /// Shuffle the keyword order once at campaign start.
    #[serde(default)]
    pub randomize: bool,

    /// Restart from the first keyword after the last one completes,
    /// preserving cumulative totals, until the total item cap is reached.
    #[serde(default)]
    pub cyclic: bool,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            per_keyword_cap: default_per_keyword_cap(),
            randomize: false,
            cyclic: false,
        }
    }
}

fn default_per_keyword_cap() -> u64 {
    10
}

/// Comment composition configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComposerConfig {
    /// Static comment templates, picked at random when no generator is
    /// configured or the generator fails.
    #[serde(default)]
    pub templates: Vec<String>,

    /// Optional remote text-generator endpoint. `None` uses templates only.
    #[serde(default)]
    pub generator_url: Option<String>,

    /// Request timeout for the generator endpoint, in seconds.
    #[serde(default = "default_generator_timeout_secs")]
    pub generator_timeout_secs: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            generator_url: None,
            generator_timeout_secs: default_generator_timeout_secs(),
        }
    }
}

fn default_generator_timeout_secs() -> u64 {
    10
}

/// State store backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("mingle").join("mingle.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("mingle.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
