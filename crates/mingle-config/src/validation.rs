// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as delay ordering, threshold ranges, and the
//! no-enabled-action case.

use crate::diagnostic::ConfigError;
use crate::model::MingleConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MingleConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.session.hourly_comment_budget == 0 {
        errors.push(ConfigError::Validation {
            message: "session.hourly_comment_budget must be at least 1".to_string(),
        });
    }

    if config.session.min_delay_secs > config.session.max_delay_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "session.min_delay_secs ({}) must not exceed session.max_delay_secs ({})",
                config.session.min_delay_secs, config.session.max_delay_secs
            ),
        });
    }

    if config.session.total_item_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "session.total_item_cap must be at least 1".to_string(),
        });
    }

    if config.session.consecutive_filtered_abort == 0 {
        errors.push(ConfigError::Validation {
            message: "session.consecutive_filtered_abort must be at least 1".to_string(),
        });
    }

    if config.session.consecutive_empty_abort == 0 {
        errors.push(ConfigError::Validation {
            message: "session.consecutive_empty_abort must be at least 1".to_string(),
        });
    }

    // With the compatibility fallback off, a session with nothing to do is
    // a configuration error surfaced at start, not a silent reaction.
    if !config.actions.react && !config.actions.comment && !config.actions.legacy_default_action {
        errors.push(ConfigError::Validation {
            message: "no action enabled: set actions.react or actions.comment \
                      (or actions.legacy_default_action for the old fallback)"
                .to_string(),
        });
    }

    if config.actions.comment
        && config.composer.templates.is_empty()
        && config.composer.generator_url.is_none()
    {
        errors.push(ConfigError::Validation {
            message: "actions.comment is enabled but composer.templates is empty \
                      and no composer.generator_url is set"
                .to_string(),
        });
    }

    if config.filters.ignore_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "filters.ignore_cap must be at least 1".to_string(),
        });
    }

    if config.filters.age_from_hours < 0.0 || config.filters.age_to_hours < 0.0 {
        errors.push(ConfigError::Validation {
            message: "filters.age_from_hours and filters.age_to_hours must be non-negative"
                .to_string(),
        });
    }

    if config.filters.age_from_hours > config.filters.age_to_hours {
        errors.push(ConfigError::Validation {
            message: format!(
                "filters.age_from_hours ({}) must not exceed filters.age_to_hours ({})",
                config.filters.age_from_hours, config.filters.age_to_hours
            ),
        });
    }

    if config.filters.engagement_min > config.filters.engagement_max {
        errors.push(ConfigError::Validation {
            message: format!(
                "filters.engagement_min ({}) must not exceed filters.engagement_max ({})",
                config.filters.engagement_min, config.filters.engagement_max
            ),
        });
    }

    for lang in &config.filters.language_allow {
        if config.filters.language_deny.contains(lang) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "language `{lang}` appears in both filters.language_allow and filters.language_deny"
                ),
            });
        }
    }

    for (i, keyword) in config.campaign.keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("campaign.keywords[{i}] must not be empty"),
            });
        }
    }

    if !config.campaign.keywords.is_empty() && config.campaign.per_keyword_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "campaign.per_keyword_cap must be at least 1 when keywords are set"
                .to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
