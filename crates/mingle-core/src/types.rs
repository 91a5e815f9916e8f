// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Mingle engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind the [`PlatformAdapter`](crate::traits::PlatformAdapter) trait.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Discovery,
    Executor,
    Composer,
    Storage,
}

/// The media shape of a discovered item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    PhotoOnly,
    VideoOnly,
    TextWithMedia,
    TextOnly,
}

/// Languages the heuristic detector can distinguish.
///
/// `Unknown` means no signal was strong enough; the filter pipeline never
/// rejects `Unknown` unless an allow-list explicitly restricts languages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    German,
    Spanish,
    Russian,
    Ukrainian,
    Unknown,
}

/// The kinds of engagement action the scheduler can attempt.
///
/// Fixed priority order: `React` before `Comment`. Only `Comment` is
/// budget-limited by the sliding-window rate limiter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    React,
    Comment,
}

/// Lifecycle phase of an engagement session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Stopped,
    Running,
    Paused,
}

/// Why a campaign ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// All configured work finished normally.
    Completed,
    /// An operator or shutdown signal stopped the session.
    Stopped,
    /// An unrecoverable error terminated the session.
    Error,
    /// An item cap or abort threshold was reached.
    CapReached,
}

/// The view the discovery collaborator is currently pointed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceView {
    /// The default home feed.
    Feed,
    /// A search results view for one keyword.
    Search { query: String },
}

impl std::fmt::Display for SurfaceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceView::Feed => write!(f, "feed"),
            SurfaceView::Search { query } => write!(f, "search:{query}"),
        }
    }
}

/// Approximate engagement metrics extracted from a discovered item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub like_count: u64,
    pub comment_count: u64,
}

/// Author-reputation signals visible on the discovered item.
///
/// These travel on the item because the discovery collaborator is the only
/// component that can see the author profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSignals {
    pub verified: bool,
    pub has_avatar: bool,
}

/// One discovered unit of remote content considered for action.
///
/// Constructed fresh each discovery pass and never mutated. The `id` is
/// derived deterministically from stable content features so the same remote
/// item yields the same id across restarts and re-discovery passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: String,
    /// Extracted body text. May be empty for media-only items.
    #[serde(default)]
    pub text: String,
    /// Author identifier. Empty when undeterminable.
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub engagement: EngagementStats,
    #[serde(default)]
    pub author: AuthorSignals,
    /// Hint from the discovery surface, when it exposes one.
    #[serde(default = "default_language_hint")]
    pub language_hint: Language,
    /// Minutes since publication, possibly estimated.
    #[serde(default)]
    pub age_minutes: f64,
    pub kind: ContentKind,
}

fn default_language_hint() -> Language {
    Language::Unknown
}

/// Per-kind action counts carried in status snapshots and persisted totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub react: u64,
    pub comment: u64,
}

impl ActionCounts {
    /// Increment the count for one action kind.
    pub fn record(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::React => self.react += 1,
            ActionKind::Comment => self.comment += 1,
        }
    }

    /// Read the count for one action kind.
    pub fn get(&self, kind: ActionKind) -> u64 {
        match kind {
            ActionKind::React => self.react,
            ActionKind::Comment => self.comment,
        }
    }

    /// Total across all kinds.
    pub fn total(&self) -> u64 {
        self.react + self.comment
    }
}

/// Read-only view of the keyword campaign cursor for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCursorSnapshot {
    pub keywords: Vec<String>,
    pub current_index: usize,
    pub current_keyword: String,
    pub active: bool,
}

/// Serialized view of session state for the control surface.
///
/// The scheduler owns the mutable state; the control surface only ever
/// reads snapshots like this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub phase: SessionPhase,
    /// Items processed by this session (reset on every start).
    pub items_processed: u64,
    /// Items processed across the whole campaign, surviving restarts.
    pub total_items_processed: u64,
    /// Cumulative per-kind action counts across the campaign.
    pub action_counts: ActionCounts,
    pub consecutive_filtered: u32,
    pub consecutive_empty_discovery: u32,
    pub cursor: Option<KeywordCursorSnapshot>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}
