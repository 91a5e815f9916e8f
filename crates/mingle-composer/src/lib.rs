// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment composition for comment-kind actions.
//!
//! Two strategies behind the [`CommentComposer`](mingle_core::CommentComposer)
//! trait: a static template pool and a remote HTTP generator, combined by
//! [`FallbackComposer`] so any generator failure degrades to the pool
//! instead of skipping the action.

pub mod fallback;
pub mod http;
pub mod pool;

pub use fallback::FallbackComposer;
pub use http::HttpComposer;
pub use pool::TemplatePool;

use mingle_config::model::ComposerConfig;
use mingle_core::MingleError;

/// Build the composer stack described by the configuration.
///
/// A generator URL yields generator-with-fallback; otherwise the pool runs
/// alone. Errors if comment composition is impossible (no templates and no
/// generator) — config validation normally catches this earlier.
pub fn from_config(config: &ComposerConfig) -> Result<FallbackComposer, MingleError> {
    let generator = match &config.generator_url {
        Some(url) => Some(HttpComposer::new(url.clone(), config.generator_timeout_secs)?),
        None => None,
    };
    // The pool backs the generator even when one is configured; with no
    // templates at all, seed a minimal neutral pool only if a generator
    // exists to carry the real work.
    let templates = if config.templates.is_empty() {
        if generator.is_none() {
            return Err(MingleError::Config(
                "comment composition requires templates or a generator_url".into(),
            ));
        }
        vec!["Nice!".to_string()]
    } else {
        config.templates.clone()
    };
    let pool = TemplatePool::new(templates)?;
    Ok(FallbackComposer::new(generator, pool))
}
