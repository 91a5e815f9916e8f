// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic language detection for candidate item text.
//!
//! Zero-cost heuristic signals only: character-script ratios and small
//! marker-word lexicons. No model inference, no network, no latency.
//! Each signal is its own [`Detector`] so the scheduler can swap or stack
//! them independently.

pub mod heuristic;
pub mod lexicon;
pub mod script;

pub use heuristic::HeuristicDetector;
pub use lexicon::MarkerLexiconDetector;
pub use script::ScriptRatioDetector;

use mingle_core::Language;

/// A pluggable language detection signal.
///
/// Implementations are pure over their input text and must never fail:
/// when a signal cannot commit to a language it returns
/// [`Language::Unknown`] and leaves the decision to the next signal.
pub trait Detector: Send + Sync {
    /// Detect the language of `text`, or `Unknown` if the signal is
    /// inconclusive.
    fn detect(&self, text: &str) -> Language;
}
