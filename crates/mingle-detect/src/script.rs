// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character-script ratio detection.
//!
//! Counts alphabetic characters per script. A dominant Cyrillic share is
//! decisive on its own and is refined into Russian vs Ukrainian via
//! distinctive letters. A dominant Latin share is NOT decisive (English,
//! German, and Spanish all use it), so the Latin case defers to the
//! marker-lexicon signal by returning `Unknown`.

use mingle_core::Language;

use crate::Detector;

/// Letters that exist in Ukrainian but not in Russian.
const UKRAINIAN_DISTINCTIVE: &[char] = &['і', 'ї', 'є', 'ґ', 'І', 'Ї', 'Є', 'Ґ'];

/// Letters that exist in Russian but not in Ukrainian.
const RUSSIAN_DISTINCTIVE: &[char] = &['ъ', 'ы', 'э', 'ё', 'Ъ', 'Ы', 'Э', 'Ё'];

/// Script-ratio detector.
pub struct ScriptRatioDetector {
    /// Minimum share of alphabetic characters that must be Cyrillic for
    /// the Cyrillic branch to commit.
    cyrillic_threshold: f32,
}

impl ScriptRatioDetector {
    /// Create a detector with the default 0.5 Cyrillic dominance threshold.
    pub fn new() -> Self {
        Self {
            cyrillic_threshold: 0.5,
        }
    }

    /// Create a detector with a custom Cyrillic dominance threshold.
    pub fn with_threshold(cyrillic_threshold: f32) -> Self {
        Self { cyrillic_threshold }
    }

    fn is_cyrillic(c: char) -> bool {
        ('\u{0400}'..='\u{04FF}').contains(&c)
    }

    /// Split Cyrillic text into Russian vs Ukrainian by distinctive letters.
    ///
    /// When neither set appears (short texts share most of the alphabet)
    /// the tie goes to Russian, the more common case in the corpus this
    /// heuristic was tuned on.
    fn split_cyrillic(text: &str) -> Language {
        let ukrainian_hits = text
            .chars()
            .filter(|c| UKRAINIAN_DISTINCTIVE.contains(c))
            .count();
        let russian_hits = text
            .chars()
            .filter(|c| RUSSIAN_DISTINCTIVE.contains(c))
            .count();

        if ukrainian_hits > russian_hits {
            Language::Ukrainian
        } else {
            Language::Russian
        }
    }
}

impl Detector for ScriptRatioDetector {
    fn detect(&self, text: &str) -> Language {
        let mut alphabetic = 0usize;
        let mut cyrillic = 0usize;
        for c in text.chars() {
            if c.is_alphabetic() {
                alphabetic += 1;
                if Self::is_cyrillic(c) {
                    cyrillic += 1;
                }
            }
        }

        if alphabetic == 0 {
            return Language::Unknown;
        }

        let ratio = cyrillic as f32 / alphabetic as f32;
        if ratio >= self.cyrillic_threshold {
            Self::split_cyrillic(text)
        } else {
            Language::Unknown
        }
    }
}

impl Default for ScriptRatioDetector {
    fn default() -> Self {
        Self::new()
    }
}
