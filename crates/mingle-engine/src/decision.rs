// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action decision.

use mingle_config::model::ActionsConfig;
use mingle_core::ActionKind;
use tracing::warn;

/// Return the action kinds to attempt for an accepted item, in fixed
/// priority order (react before comment).
///
/// With no kind enabled the result is empty unless
/// `legacy_default_action` is set, which restores the historical implicit
/// react fallback. Config validation rejects the empty case at session
/// start when the flag is off, so an empty return only occurs for callers
/// bypassing validation.
pub fn decide(config: &ActionsConfig) -> Vec<ActionKind> {
    let mut kinds = Vec::with_capacity(2);
    if config.react {
        kinds.push(ActionKind::React);
    }
    if config.comment {
        kinds.push(ActionKind::Comment);
    }
    if kinds.is_empty() && config.legacy_default_action {
        warn!("no action kind enabled, applying legacy react fallback");
        kinds.push(ActionKind::React);
    }
    kinds
}
