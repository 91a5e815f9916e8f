// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter pipeline.
//!
//! Ordered short-circuit evaluation of one candidate item against the
//! session configuration, cheap and definitive checks first. The verdict
//! distinguishes routine skips (malformed items, dedup hits) from quality
//! rejections: only the latter count toward the consecutive-filtered abort
//! threshold.

use mingle_config::model::{EngagementMatch, FiltersConfig};
use mingle_core::{CandidateItem, ContentKind, Language};
use mingle_detect::Detector;
use tracing::trace;

use crate::registry::IgnoreRegistry;

/// Why an item was skipped without counting as a quality rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipCause {
    /// Malformed item: no usable text or structure.
    Malformed,
    /// Item id already in the content ignore registry.
    ContentDuplicate,
    /// Author id already in the author ignore registry.
    AuthorDuplicate,
}

/// Outcome of one pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Item passed every filter.
    Accept,
    /// Routine skip, not counted toward the abort threshold.
    Skip(SkipCause),
    /// Quality rejection by the named filter stage.
    Reject(&'static str),
}

/// The ordered filter chain.
pub struct FilterPipeline {
    config: FiltersConfig,
    detector: Box<dyn Detector>,
}

impl FilterPipeline {
    pub fn new(config: FiltersConfig, detector: Box<dyn Detector>) -> Self {
        Self { config, detector }
    }

    /// Evaluate `item`, short-circuiting on the first failing stage.
    ///
    /// Pure with respect to its inputs apart from registry membership
    /// lookups; replaying the same item against unchanged registries and
    /// config yields the same verdict.
    pub fn evaluate(
        &self,
        item: &CandidateItem,
        content_ignore: &IgnoreRegistry,
        author_ignore: &IgnoreRegistry,
    ) -> Verdict {
        if !Self::is_well_formed(item) {
            trace!(item = %item.id, "skip: malformed");
            return Verdict::Skip(SkipCause::Malformed);
        }

        if self.config.content_dedup && content_ignore.contains(&item.id) {
            trace!(item = %item.id, "skip: content duplicate");
            return Verdict::Skip(SkipCause::ContentDuplicate);
        }

        if self.config.author_dedup && author_ignore.contains(&item.author_id) {
            trace!(item = %item.id, author = %item.author_id, "skip: author duplicate");
            return Verdict::Skip(SkipCause::AuthorDuplicate);
        }

        if self.config.age_enabled && !self.age_in_window(item) {
            return Verdict::Reject("age");
        }

        if !self.config.allowed_kinds.is_empty()
            && !self.config.allowed_kinds.contains(&item.kind)
        {
            return Verdict::Reject("kind");
        }

        if !self.language_allowed(item) {
            return Verdict::Reject("language");
        }

        if !self.reputation_matches(item) {
            return Verdict::Reject("reputation");
        }

        if self.config.engagement_enabled && !self.engagement_in_range(item) {
            return Verdict::Reject("engagement");
        }

        Verdict::Accept
    }

    /// An item is usable when it has an id and either body text or a media
    /// structure that makes an empty body legitimate.
    fn is_well_formed(item: &CandidateItem) -> bool {
        if item.id.is_empty() {
            return false;
        }
        match item.kind {
            ContentKind::TextOnly => !item.text.trim().is_empty(),
            ContentKind::PhotoOnly | ContentKind::VideoOnly | ContentKind::TextWithMedia => true,
        }
    }

    fn age_in_window(&self, item: &CandidateItem) -> bool {
        let from_minutes = self.config.age_from_hours * 60.0;
        let to_minutes = self.config.age_to_hours * 60.0;
        item.age_minutes >= from_minutes && item.age_minutes <= to_minutes
    }

    fn language_allowed(&self, item: &CandidateItem) -> bool {
        let detected = if item.language_hint != Language::Unknown {
            item.language_hint
        } else {
            self.detector.detect(&item.text)
        };

        // Unknown is only rejectable through a non-empty allow-list.
        if detected != Language::Unknown && self.config.language_deny.contains(&detected) {
            return false;
        }
        if !self.config.language_allow.is_empty()
            && !self.config.language_allow.contains(&detected)
        {
            return false;
        }
        true
    }

    fn reputation_matches(&self, item: &CandidateItem) -> bool {
        if let Some(required) = self.config.require_verified
            && item.author.verified != required
        {
            return false;
        }
        if let Some(required) = self.config.require_avatar
            && item.author.has_avatar != required
        {
            return false;
        }
        true
    }

    /// Inclusive range check per metric; `any` passes when either metric
    /// is in range, `all` requires both.
    fn engagement_in_range(&self, item: &CandidateItem) -> bool {
        let min = self.config.engagement_min;
        let max = self.config.engagement_max;
        let like_ok = item.engagement.like_count >= min && item.engagement.like_count <= max;
        let comment_ok =
            item.engagement.comment_count >= min && item.engagement.comment_count <= max;
        match self.config.engagement_match {
            EngagementMatch::Any => like_ok || comment_ok,
            EngagementMatch::All => like_ok && comment_ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mingle_core::{AuthorSignals, EngagementStats};
    use mingle_detect::HeuristicDetector;
    use mingle_test_utils::fixtures::{item, item_by};

    fn pipeline(config: FiltersConfig) -> FilterPipeline {
        FilterPipeline::new(config, Box::new(HeuristicDetector::new()))
    }

    fn empty_registries() -> (IgnoreRegistry, IgnoreRegistry) {
        (IgnoreRegistry::new(100), IgnoreRegistry::new(100))
    }

    #[test]
    fn default_config_accepts_fixture_item() {
        let p = pipeline(FiltersConfig::default());
        let (content, authors) = empty_registries();
        assert_eq!(p.evaluate(&item("a"), &content, &authors), Verdict::Accept);
    }

    #[test]
    fn missing_id_is_malformed() {
        let p = pipeline(FiltersConfig::default());
        let (content, authors) = empty_registries();
        let mut bad = item("a");
        bad.id = String::new();
        assert_eq!(
            p.evaluate(&bad, &content, &authors),
            Verdict::Skip(SkipCause::Malformed)
        );
    }

    #[test]
    fn text_only_item_without_text_is_malformed() {
        let p = pipeline(FiltersConfig::default());
        let (content, authors) = empty_registries();
        let mut bad = item("a");
        bad.text = "   ".into();
        assert_eq!(
            p.evaluate(&bad, &content, &authors),
            Verdict::Skip(SkipCause::Malformed)
        );
    }

    #[test]
    fn media_item_without_text_is_well_formed() {
        let p = pipeline(FiltersConfig::default());
        let (content, authors) = empty_registries();
        let mut media = item("a");
        media.text = String::new();
        media.kind = ContentKind::PhotoOnly;
        assert_eq!(p.evaluate(&media, &content, &authors), Verdict::Accept);
    }

    #[test]
    fn content_dedup_skips_known_ids() {
        let p = pipeline(FiltersConfig::default());
        let (mut content, authors) = empty_registries();
        content.insert("seen".into());
        assert_eq!(
            p.evaluate(&item("seen"), &content, &authors),
            Verdict::Skip(SkipCause::ContentDuplicate)
        );
    }

    #[test]
    fn content_dedup_can_be_disabled() {
        let config = FiltersConfig {
            content_dedup: false,
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (mut content, authors) = empty_registries();
        content.insert("seen".into());
        assert_eq!(p.evaluate(&item("seen"), &content, &authors), Verdict::Accept);
    }

    #[test]
    fn author_dedup_skips_known_authors() {
        let p = pipeline(FiltersConfig::default());
        let (content, mut authors) = empty_registries();
        authors.insert("alice".into());
        assert_eq!(
            p.evaluate(&item_by("new", "alice"), &content, &authors),
            Verdict::Skip(SkipCause::AuthorDuplicate)
        );
    }

    #[test]
    fn age_window_rejects_out_of_range() {
        let config = FiltersConfig {
            age_enabled: true,
            age_from_hours: 0.0,
            age_to_hours: 2.0,
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();

        let mut fresh = item("fresh");
        fresh.age_minutes = 30.0;
        assert_eq!(p.evaluate(&fresh, &content, &authors), Verdict::Accept);

        let mut stale = item("stale");
        stale.age_minutes = 200.0;
        assert_eq!(
            p.evaluate(&stale, &content, &authors),
            Verdict::Reject("age")
        );
    }

    #[test]
    fn disabled_age_filter_always_passes() {
        let p = pipeline(FiltersConfig::default());
        let (content, authors) = empty_registries();
        let mut old = item("old");
        old.age_minutes = 1_000_000.0;
        assert_eq!(p.evaluate(&old, &content, &authors), Verdict::Accept);
    }

    #[test]
    fn kind_filter_rejects_disallowed_kinds() {
        let config = FiltersConfig {
            allowed_kinds: vec![ContentKind::PhotoOnly],
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();
        assert_eq!(
            p.evaluate(&item("text"), &content, &authors),
            Verdict::Reject("kind")
        );
    }

    #[test]
    fn deny_list_rejects_detected_language() {
        let config = FiltersConfig {
            language_deny: vec![Language::English],
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();
        let mut english = item("en");
        english.text = "this is just what you love about the mountains".into();
        assert_eq!(
            p.evaluate(&english, &content, &authors),
            Verdict::Reject("language")
        );
    }

    #[test]
    fn unknown_language_passes_deny_list() {
        let config = FiltersConfig {
            language_deny: vec![Language::English],
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();
        // Fixture text does not resolve to any language.
        assert_eq!(p.evaluate(&item("a"), &content, &authors), Verdict::Accept);
    }

    #[test]
    fn allow_list_rejects_unknown_language() {
        let config = FiltersConfig {
            language_allow: vec![Language::German],
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();
        assert_eq!(
            p.evaluate(&item("a"), &content, &authors),
            Verdict::Reject("language")
        );
    }

    #[test]
    fn language_hint_takes_precedence_over_detection() {
        let config = FiltersConfig {
            language_allow: vec![Language::Spanish],
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();
        let mut hinted = item("a");
        hinted.language_hint = Language::Spanish;
        assert_eq!(p.evaluate(&hinted, &content, &authors), Verdict::Accept);
    }

    #[test]
    fn reputation_filter_honors_both_signals() {
        let config = FiltersConfig {
            require_verified: Some(true),
            require_avatar: Some(true),
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();

        let mut matching = item("a");
        matching.author = AuthorSignals {
            verified: true,
            has_avatar: true,
        };
        assert_eq!(p.evaluate(&matching, &content, &authors), Verdict::Accept);

        let unverified = item("b");
        assert_eq!(
            p.evaluate(&unverified, &content, &authors),
            Verdict::Reject("reputation")
        );
    }

    #[test]
    fn engagement_any_passes_when_either_metric_in_range() {
        let config = FiltersConfig {
            engagement_enabled: true,
            engagement_min: 5,
            engagement_max: 100,
            engagement_match: EngagementMatch::Any,
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();

        // like_count=10 in range, comment_count=2 below min.
        assert_eq!(p.evaluate(&item("a"), &content, &authors), Verdict::Accept);

        let mut neither = item("b");
        neither.engagement = EngagementStats {
            like_count: 0,
            comment_count: 1000,
        };
        assert_eq!(
            p.evaluate(&neither, &content, &authors),
            Verdict::Reject("engagement")
        );
    }

    #[test]
    fn engagement_all_requires_both_metrics_in_range() {
        let config = FiltersConfig {
            engagement_enabled: true,
            engagement_min: 5,
            engagement_max: 100,
            engagement_match: EngagementMatch::All,
            ..FiltersConfig::default()
        };
        let p = pipeline(config);
        let (content, authors) = empty_registries();
        // like_count=10 in range, comment_count=2 below min: any would
        // pass, all must not.
        assert_eq!(
            p.evaluate(&item("a"), &content, &authors),
            Verdict::Reject("engagement")
        );
    }

    #[test]
    fn replay_is_idempotent() {
        let p = pipeline(FiltersConfig::default());
        let (content, authors) = empty_registries();
        let candidate = item("same");
        let first = p.evaluate(&candidate, &content, &authors);
        for _ in 0..5 {
            assert_eq!(p.evaluate(&candidate, &content, &authors), first);
        }
    }
}
