// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Mingle engagement engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Mingle workspace. All collaborator
//! adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MingleError;
pub use types::{
    ActionCounts, ActionKind, AdapterType, AuthorSignals, CandidateItem, ContentKind,
    EngagementStats, HealthStatus, KeywordCursorSnapshot, Language, SessionPhase,
    SessionSnapshot, StopReason, SurfaceView,
};

// Re-export all collaborator traits at crate root.
pub use traits::{ActionExecutor, CommentComposer, DiscoveryAdapter, PlatformAdapter, StateStore};
