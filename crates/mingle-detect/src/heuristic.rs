// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Combined detection strategy: script ratio first, lexicon second.

use mingle_core::Language;
use tracing::debug;

use crate::lexicon::MarkerLexiconDetector;
use crate::script::ScriptRatioDetector;
use crate::Detector;

/// The default detector stack used by the filter pipeline.
///
/// The script signal is decisive for Cyrillic text; everything it cannot
/// resolve falls through to the marker lexicon. Any remaining `Unknown`
/// stays `Unknown`, which the pipeline treats as pass-through unless an
/// allow-list restricts languages explicitly.
pub struct HeuristicDetector {
    script: ScriptRatioDetector,
    lexicon: MarkerLexiconDetector,
}

impl HeuristicDetector {
    pub fn new() -> Self {
        Self {
            script: ScriptRatioDetector::new(),
            lexicon: MarkerLexiconDetector::new(),
        }
    }

    /// Build from pre-configured signals.
    pub fn with_signals(script: ScriptRatioDetector, lexicon: MarkerLexiconDetector) -> Self {
        Self { script, lexicon }
    }
}

impl Detector for HeuristicDetector {
    fn detect(&self, text: &str) -> Language {
        let by_script = self.script.detect(text);
        if by_script != Language::Unknown {
            debug!(language = %by_script, "detected by script ratio");
            return by_script;
        }
        let by_lexicon = self.lexicon.detect(text);
        if by_lexicon != Language::Unknown {
            debug!(language = %by_lexicon, "detected by marker lexicon");
        }
        by_lexicon
    }
}

impl Default for HeuristicDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrillic_resolves_without_lexicon() {
        let d = HeuristicDetector::new();
        assert_eq!(d.detect("это очень красиво"), Language::Russian);
        assert_eq!(d.detect("які чудові краєвиди"), Language::Ukrainian);
    }

    #[test]
    fn latin_falls_through_to_lexicon() {
        let d = HeuristicDetector::new();
        assert_eq!(d.detect("this is the best view"), Language::English);
        assert_eq!(d.detect("das ist sehr schön"), Language::German);
        assert_eq!(d.detect("muy bonito, gracias"), Language::Spanish);
    }

    #[test]
    fn unresolvable_text_stays_unknown() {
        let d = HeuristicDetector::new();
        assert_eq!(d.detect(""), Language::Unknown);
        assert_eq!(d.detect("wow 123"), Language::Unknown);
    }
}
