// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword campaign cursor.
//!
//! A persisted iterator over the configured search terms. Advancing to the
//! next keyword makes the discovery surface navigate to a new view, which
//! on some surfaces tears down and restarts the whole process; the cursor
//! is therefore persisted before every navigation so a restarted scheduler
//! resumes at the saved index instead of re-running completed keywords.

use mingle_core::{KeywordCursorSnapshot, MingleError};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted position within a keyword campaign.
///
/// Invariant: `current_index < keywords.len()` while `active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCursor {
    keywords: Vec<String>,
    current_index: usize,
    active: bool,
}

impl KeywordCursor {
    /// Start a campaign over `keywords`, optionally shuffling the order.
    ///
    /// The shuffled order is what gets persisted, so a resumed campaign
    /// keeps the order it started with.
    pub fn new(mut keywords: Vec<String>, randomize: bool) -> Result<Self, MingleError> {
        if keywords.is_empty() {
            return Err(MingleError::Config(
                "keyword campaign requires at least one keyword".into(),
            ));
        }
        if randomize {
            keywords.shuffle(&mut rand::thread_rng());
        }
        Ok(Self {
            keywords,
            current_index: 0,
            active: true,
        })
    }

    /// Rebuild a cursor from a persisted JSON snapshot.
    pub fn restore_json(json: &str) -> Result<Self, MingleError> {
        let cursor: Self = serde_json::from_str(json)
            .map_err(|e| MingleError::Internal(format!("invalid cursor snapshot: {e}")))?;
        if cursor.active && cursor.current_index >= cursor.keywords.len() {
            return Err(MingleError::Internal(
                "cursor snapshot index out of bounds".into(),
            ));
        }
        debug!(index = cursor.current_index, active = cursor.active, "cursor restored");
        Ok(cursor)
    }

    /// Serialize for persistence.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// The keyword being processed, while the campaign is active.
    pub fn current_keyword(&self) -> Option<&str> {
        if self.active {
            self.keywords.get(self.current_index).map(String::as_str)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Move to the next keyword. Returns the new current keyword, or
    /// `None` when the campaign completed (the cursor deactivates).
    pub fn advance(&mut self) -> Option<&str> {
        if !self.active {
            return None;
        }
        if self.current_index + 1 < self.keywords.len() {
            self.current_index += 1;
            self.keywords.get(self.current_index).map(String::as_str)
        } else {
            self.active = false;
            None
        }
    }

    /// Restart at index 0, used by cyclic campaigns after completion.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.active = true;
    }

    /// Read-only view for status reporting.
    pub fn status_snapshot(&self) -> KeywordCursorSnapshot {
        KeywordCursorSnapshot {
            keywords: self.keywords.clone(),
            current_index: self.current_index,
            current_keyword: self.current_keyword().unwrap_or_default().to_string(),
            active: self.active,
        }
    }
}
