//! Language detection — fixed-vocabulary substring scan.

use std::collections::BTreeSet;

/// Language names recognized anywhere in a CV, lowercase.
const LANGUAGE_VOCABULARY: &[&str] = &[
    "english",
    "french",
    "spanish",
    "german",
    "italian",
    "portuguese",
    "dutch",
    "russian",
    "polish",
    "swedish",
    "turkish",
    "arabic",
    "hebrew",
    "hindi",
    "bengali",
    "urdu",
    "chinese",
    "mandarin",
    "cantonese",
    "japanese",
    "korean",
    "vietnamese",
];

/// Returns every vocabulary language appearing as a substring of the
/// case-folded text. Section-agnostic: "fluent in French" counts the same
/// as an entry under a Languages heading.
pub fn detect_languages(text: &str) -> BTreeSet<String> {
    let folded = text.to_lowercase();
    LANGUAGE_VOCABULARY
        .iter()
        .copied()
        .filter(|language| folded.contains(language))
        .map(|language| language.to_string())
        .collect()
}
