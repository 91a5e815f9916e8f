// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action executor trait for performing concrete actions against items.

use async_trait::async_trait;

use crate::error::MingleError;
use crate::traits::adapter::PlatformAdapter;
use crate::types::{ActionKind, CandidateItem};

/// Adapter for the action-executor collaborator.
///
/// Executors perform one concrete action against one item. The scheduler
/// treats `Ok(false)` and `Err(_)` identically: skip the action, do not
/// record it, do not persist ignore-state for it. Exactly-once delivery is
/// not guaranteed; the executor's own success report is trusted.
#[async_trait]
pub trait ActionExecutor: PlatformAdapter {
    /// Executes `kind` against `item`.
    ///
    /// `comment` carries the composed text for comment-kind actions and is
    /// `None` for all other kinds.
    async fn execute(
        &self,
        item: &CandidateItem,
        kind: ActionKind,
        comment: Option<&str>,
    ) -> Result<bool, MingleError>;
}
