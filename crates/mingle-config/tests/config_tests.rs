// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Mingle configuration system.

use mingle_config::diagnostic::ConfigError;
use mingle_config::{load_and_validate_str, load_config_from_str};
use mingle_core::types::{ContentKind, Language};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_mingle_config() {
    let toml = r#"
[engine]
name = "test-engine"
log_level = "debug"

[session]
hourly_comment_budget = 4
min_delay_secs = 2
max_delay_secs = 6
total_item_cap = 50
consecutive_filtered_abort = 10
consecutive_empty_abort = 2

[actions]
react = true
comment = true

[filters]
content_dedup = true
author_dedup = false
age_enabled = true
age_from_hours = 0.5
age_to_hours = 48.0
allowed_kinds = ["text_only", "text_with_media"]
language_allow = ["english", "german"]
language_deny = ["russian"]
require_verified = false
engagement_enabled = true
engagement_min = 5
engagement_max = 5000
engagement_match = "all"

[campaign]
keywords = ["cats", "dogs"]
per_keyword_cap = 3
randomize = true
cyclic = true

[composer]
templates = ["Love this!", "Great post."]
generator_url = "http://localhost:9000/compose"
generator_timeout_secs = 5

[storage]
database_path = "/tmp/test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.engine.name, "test-engine");
    assert_eq!(config.engine.log_level, "debug");
    assert_eq!(config.session.hourly_comment_budget, 4);
    assert_eq!(config.session.min_delay_secs, 2);
    assert_eq!(config.session.max_delay_secs, 6);
    assert_eq!(config.session.total_item_cap, 50);
    assert!(config.actions.react);
    assert!(config.actions.comment);
    assert!(!config.actions.legacy_default_action);
    assert!(config.filters.content_dedup);
    assert!(!config.filters.author_dedup);
    assert_eq!(
        config.filters.allowed_kinds,
        vec![ContentKind::TextOnly, ContentKind::TextWithMedia]
    );
    assert_eq!(
        config.filters.language_allow,
        vec![Language::English, Language::German]
    );
    assert_eq!(config.filters.language_deny, vec![Language::Russian]);
    assert_eq!(config.filters.require_verified, Some(false));
    assert!(config.filters.require_avatar.is_none());
    assert_eq!(config.campaign.keywords, vec!["cats", "dogs"]);
    assert_eq!(config.campaign.per_keyword_cap, 3);
    assert!(config.campaign.randomize);
    assert!(config.campaign.cyclic);
    assert_eq!(config.composer.templates.len(), 2);
    assert_eq!(
        config.composer.generator_url.as_deref(),
        Some("http://localhost:9000/compose")
    );
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
}

/// Unknown field in [campaign] produces an error mentioning the bad key.
#[test]
fn unknown_field_in_campaign_produces_error() {
    let toml = r#"
[campaign]
keywrods = ["cats"]
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("keywrods"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.engine.name, "mingle");
    assert_eq!(config.engine.log_level, "info");
    assert_eq!(config.session.hourly_comment_budget, 8);
    assert_eq!(config.session.min_delay_secs, 8);
    assert_eq!(config.session.max_delay_secs, 25);
    assert!(config.actions.react);
    assert!(!config.actions.comment);
    assert!(config.filters.content_dedup);
    assert!(config.filters.author_dedup);
    assert_eq!(config.filters.ignore_cap, 5_000);
    assert!(config.filters.allowed_kinds.is_empty());
    assert!(config.campaign.keywords.is_empty());
    assert!(!config.campaign.cyclic);
    assert!(config.composer.generator_url.is_none());
    assert!(config.storage.wal_mode);
}

/// load_and_validate_str surfaces semantic validation errors.
#[test]
fn load_and_validate_str_rejects_no_enabled_action() {
    let toml = r#"
[actions]
react = false
comment = false
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("no action enabled"))
    ));
}

/// load_and_validate_str converts figment unknown-field errors to diagnostics.
#[test]
fn load_and_validate_str_produces_unknown_key_diagnostic() {
    let toml = r#"
[session]
min_delay_sec = 5
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail on unknown key");
    let has_unknown = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "min_delay_sec" && suggestion.as_deref() == Some("min_delay_secs")
        )
    });
    assert!(
        has_unknown,
        "expected UnknownKey diagnostic with suggestion, got: {errors:?}"
    );
}

/// Wrong-type values produce an InvalidType or Other diagnostic, not a panic.
#[test]
fn wrong_type_value_produces_diagnostic() {
    let toml = r#"
[session]
total_item_cap = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail on wrong type");
    assert!(!errors.is_empty());
}

/// Environment variable MINGLE_SESSION_TOTAL_ITEM_CAP overrides TOML.
#[test]
#[serial_test::serial]
fn env_var_overrides_total_item_cap() {
    use figment::Jail;

    Jail::expect_with(|jail| {
        jail.set_env("MINGLE_SESSION_TOTAL_ITEM_CAP", "7");
        jail.create_file(
            "mingle.toml",
            r#"
[session]
total_item_cap = 99
"#,
        )?;

        let config = mingle_config::load_config().expect("config should load");
        assert_eq!(config.session.total_item_cap, 7);
        Ok(())
    });
}

/// An invalid keyword list fails validation with an indexed message.
#[test]
fn blank_keyword_is_reported_with_index() {
    let toml = r#"
[campaign]
keywords = ["cats", ""]
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("keywords[1]"))
    ));
}
