// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into rich miette diagnostics
//! with source spans, valid key listings, and "did you mean?" suggestions
//! using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `keywrods` -> `keywords` or
/// `min_delay_sec` -> `min_delay_secs` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
///
/// Each variant carries enough context for miette to render an Elm-style
/// error message with source spans, suggestions, and valid key listings.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(mingle::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(mingle::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// The key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
        /// What type was expected.
        expected: String,
        /// Source span for the offending value.
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        /// The source file content.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(mingle::config::missing_key),
        help("add `{key} = <value>` to your mingle.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(mingle::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(mingle::config::other))]
    Other(String),
}

impl ConfigError {
    /// Build an `UnknownKey` diagnostic, annotating it with a source span
    /// when the offending file is among the loaded TOML sources.
    fn unknown_key(
        key: &str,
        valid_keys: &[&str],
        error: &figment::error::Error,
        sources: &[(String, String)],
    ) -> Self {
        let (span, src) = match annotate(error, key, sources) {
            Some((span, src)) => (Some(span), Some(src)),
            None => (None, None),
        };
        ConfigError::UnknownKey {
            key: key.to_string(),
            suggestion: suggest_key(key, valid_keys),
            valid_keys: valid_keys.join(", "),
            span,
            src,
        }
    }
}

/// Format the help message for unknown key errors.
fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error is itself an iterator over individual errors; each one
/// maps to a variant, with fuzzy-match suggestions and source spans
/// attached to unknown-field errors.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                ConfigError::unknown_key(field, &expected.to_vec(), &error, toml_sources)
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: dotted(&error.path),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
                span: None,
                src: None,
            },
            _ => ConfigError::Other(format!("{error}")),
        })
        .collect()
}

/// Join a figment error path into the `section.key` form users typed.
fn dotted(path: &[String]) -> String {
    path.join(".")
}

/// Locate `key` in the TOML source the error originated from.
///
/// Returns the span of the key name plus the named source for miette's
/// context rendering, or `None` when the error carries no file metadata
/// or the key cannot be found in it.
fn annotate(
    error: &figment::error::Error,
    key: &str,
    sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let path = error.metadata.as_ref()?.source.as_ref().and_then(|s| {
        match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        }
    })?;
    let (_, content) = sources.iter().find(|(p, _)| *p == path)?;

    let section = error.path.first().map(String::as_str);
    let offset = key_offset(content, section, key)?;
    Some((
        SourceSpan::new(offset.into(), key.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `key` within its TOML section.
///
/// Walks the content line by line, tracking which `[section]` the walk is
/// currently inside, and matches the key only in the section the error
/// path names (`None` means the top level, before any header).
fn key_offset(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            current = header.split(']').next();
        } else if current == section
            && let Some(rest) = trimmed.strip_prefix(key)
        {
            // Guard against key names that are a prefix of another key.
            if rest.starts_with('=') || rest.starts_with(' ') || rest.starts_with('\t') {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len() + 1; // +1 for newline
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the closest valid key scoring above the threshold, if any.
fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
