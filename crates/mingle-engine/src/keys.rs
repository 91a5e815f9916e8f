// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stable state-store keys.
//!
//! These names are a persistence contract: renaming any of them breaks
//! resume fidelity for existing installations.

/// Content ignore registry (item ids already acted upon).
pub const IGNORE_CONTENT: &str = "ignore/content";

/// Author ignore registry (author ids already acted upon).
pub const IGNORE_AUTHORS: &str = "ignore/authors";

/// Sliding-window timestamps for the comment rate limiter.
pub const LIMITER_COMMENT: &str = "limiter/comment";

/// Keyword campaign cursor position.
pub const CAMPAIGN_CURSOR: &str = "campaign/cursor";

/// Cumulative counters snapshot.
pub const SESSION_COUNTERS: &str = "session/counters";
