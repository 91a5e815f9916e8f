// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures: candidate item builders and permissive test configs.

use mingle_config::model::MingleConfig;
use mingle_core::{AuthorSignals, CandidateItem, ContentKind, EngagementStats, Language};

/// A text-only candidate item that passes every filter under [`config`].
pub fn item(id: &str) -> CandidateItem {
    CandidateItem {
        id: id.to_string(),
        text: format!("candidate item {id}"),
        author_id: format!("author-{id}"),
        engagement: EngagementStats {
            like_count: 10,
            comment_count: 2,
        },
        author: AuthorSignals {
            verified: false,
            has_avatar: true,
        },
        language_hint: Language::Unknown,
        age_minutes: 60.0,
        kind: ContentKind::TextOnly,
    }
}

/// An item with a distinct author, for author-dedup scenarios.
pub fn item_by(id: &str, author_id: &str) -> CandidateItem {
    CandidateItem {
        author_id: author_id.to_string(),
        ..item(id)
    }
}

/// A config tuned for fast deterministic tests: zero delays, react enabled,
/// generous caps, no optional filters.
pub fn config() -> MingleConfig {
    let mut config = MingleConfig::default();
    config.session.min_delay_secs = 0;
    config.session.max_delay_secs = 0;
    config.session.total_item_cap = 1000;
    config.actions.react = true;
    config.actions.comment = false;
    config
}

/// Like [`config`] but with comment actions enabled and a template so
/// validation passes.
pub fn comment_config() -> MingleConfig {
    let mut config = config();
    config.actions.comment = true;
    config.composer.templates = vec!["Great post!".to_string()];
    config
}
