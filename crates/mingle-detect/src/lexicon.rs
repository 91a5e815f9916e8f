// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker-word lexicon detection.
//!
//! Scores text against small per-language lists of high-frequency function
//! words, with distinctive orthography (German umlauts and eszett, Spanish
//! tilde-n and inverted punctuation) breaking ties between Latin-script
//! languages.

use mingle_core::Language;

use crate::Detector;

/// High-frequency English function words.
const ENGLISH_MARKERS: &[&str] = &[
    "the", "and", "this", "that", "with", "for", "you", "your", "are",
    "have", "was", "from", "what", "just", "love", "like", "very",
];

/// High-frequency German function words.
const GERMAN_MARKERS: &[&str] = &[
    "der", "die", "das", "und", "ich", "ist", "nicht", "ein", "eine",
    "mit", "für", "auf", "sehr", "auch", "aber", "heute", "schön",
];

/// High-frequency Spanish function words.
const SPANISH_MARKERS: &[&str] = &[
    "el", "la", "los", "las", "que", "con", "por", "para", "una", "uno",
    "este", "esta", "muy", "pero", "como", "hoy", "gracias",
];

/// High-frequency Russian function words (transliterated matching is not
/// attempted; Cyrillic text normally resolves via the script signal first).
const RUSSIAN_MARKERS: &[&str] = &[
    "это", "как", "что", "очень", "для", "так", "спасибо", "сегодня",
];

/// High-frequency Ukrainian function words.
const UKRAINIAN_MARKERS: &[&str] = &[
    "це", "дуже", "але", "дякую", "сьогодні", "які", "того", "вже",
];

/// Characters that only appear in German orthography among the supported
/// Latin-script languages.
const GERMAN_CHARS: &[char] = &['ä', 'ö', 'ü', 'ß', 'Ä', 'Ö', 'Ü'];

/// Characters that only appear in Spanish orthography among the supported
/// Latin-script languages.
const SPANISH_CHARS: &[char] = &['ñ', 'Ñ', '¿', '¡', 'á', 'é', 'í', 'ó', 'ú'];

/// Marker-lexicon detector.
pub struct MarkerLexiconDetector {
    /// Minimum marker hits before the signal commits to a language.
    min_hits: usize,
}

impl MarkerLexiconDetector {
    /// Create a detector requiring at least one marker hit.
    pub fn new() -> Self {
        Self { min_hits: 1 }
    }

    /// Create a detector with a custom minimum hit count.
    pub fn with_min_hits(min_hits: usize) -> Self {
        Self { min_hits }
    }

    fn count_hits(words: &[&str], markers: &[&str]) -> usize {
        words.iter().filter(|w| markers.contains(w)).count()
    }

    fn count_chars(text: &str, chars: &[char]) -> usize {
        text.chars().filter(|c| chars.contains(c)).count()
    }
}

impl Detector for MarkerLexiconDetector {
    fn detect(&self, text: &str) -> Language {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Language::Unknown;
        }

        let mut scores = [
            (Language::English, Self::count_hits(&words, ENGLISH_MARKERS)),
            (Language::German, Self::count_hits(&words, GERMAN_MARKERS)),
            (Language::Spanish, Self::count_hits(&words, SPANISH_MARKERS)),
            (Language::Russian, Self::count_hits(&words, RUSSIAN_MARKERS)),
            (
                Language::Ukrainian,
                Self::count_hits(&words, UKRAINIAN_MARKERS),
            ),
        ];

        // Distinctive orthography weighs more than a single shared word.
        scores[1].1 += 2 * Self::count_chars(text, GERMAN_CHARS);
        scores[2].1 += 2 * Self::count_chars(text, SPANISH_CHARS);

        let (best_lang, best_score) = scores
            .iter()
            .copied()
            .max_by_key(|(_, score)| *score)
            .unwrap_or((Language::Unknown, 0));

        let runner_up = scores
            .iter()
            .filter(|(lang, _)| *lang != best_lang)
            .map(|(_, score)| *score)
            .max()
            .unwrap_or(0);

        // An exact tie between two languages is inconclusive.
        if best_score < self.min_hits || best_score == runner_up {
            Language::Unknown
        } else {
            best_lang
        }
    }
}

impl Default for MarkerLexiconDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_numeric_text_is_unknown() {
        let d = MarkerLexiconDetector::new();
        assert_eq!(d.detect(""), Language::Unknown);
        assert_eq!(d.detect("2024 !!! 100%"), Language::Unknown);
    }

    #[test]
    fn english_markers_win() {
        let d = MarkerLexiconDetector::new();
        assert_eq!(
            d.detect("this is just what you love about the mountains"),
            Language::English
        );
    }

    #[test]
    fn german_markers_win() {
        let d = MarkerLexiconDetector::new();
        assert_eq!(
            d.detect("das ist aber ein sehr guter Tag heute"),
            Language::German
        );
    }

    #[test]
    fn spanish_markers_win() {
        let d = MarkerLexiconDetector::new();
        assert_eq!(
            d.detect("muy buenas fotos para este canal, gracias"),
            Language::Spanish
        );
    }

    #[test]
    fn german_chars_break_latin_tie() {
        let d = MarkerLexiconDetector::new();
        // "der" alone could be misread, the umlaut settles it.
        assert_eq!(d.detect("der Käse schmeckt"), Language::German);
    }

    #[test]
    fn spanish_punctuation_breaks_latin_tie() {
        let d = MarkerLexiconDetector::new();
        assert_eq!(d.detect("¿no es precioso?"), Language::Spanish);
    }

    #[test]
    fn exact_tie_is_unknown() {
        let d = MarkerLexiconDetector::new();
        // "la" is Spanish, "was" is English, one hit each.
        assert_eq!(d.detect("la paloma was here"), Language::Unknown);
    }

    #[test]
    fn cyrillic_markers_still_resolve() {
        let d = MarkerLexiconDetector::new();
        assert_eq!(d.detect("дуже дякую за фото"), Language::Ukrainian);
        assert_eq!(d.detect("очень красиво, спасибо"), Language::Russian);
    }

    #[test]
    fn min_hits_threshold_applies() {
        let d = MarkerLexiconDetector::with_min_hits(3);
        assert_eq!(d.detect("the sunset"), Language::Unknown);
        assert_eq!(
            d.detect("the sunset and the sea with you"),
            Language::English
        );
    }
}
