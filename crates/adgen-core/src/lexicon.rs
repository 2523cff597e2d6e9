//! Shared scoring lexicons.
//!
//! Keys are lowercase words or phrases matched case-insensitively against
//! ad copy. These tables feed both the copy scorer and the performance
//! feature extractors, so they live here rather than in either agent crate.

/// Persuasive "power words" counted by the emotional scorer and the
/// performance feature extractor.
pub const POWER_WORDS: &[&str] = &[
    "free",
    "new",
    "proven",
    "instant",
    "instantly",
    "exclusive",
    "secret",
    "guaranteed",
    "limited",
    "now",
    "today",
    "save",
    "unlock",
    "discover",
    "effortless",
    "powerful",
    "breakthrough",
    "finally",
    "transform",
    "boost",
];

/// Emotional-lexicon words; one hit is enough for the emotional bonus.
pub const EMOTIONAL_WORDS: &[&str] = &[
    "love",
    "fear",
    "dream",
    "worry",
    "stress",
    "joy",
    "frustrated",
    "tired",
    "excited",
    "confident",
    "proud",
    "relief",
    "struggle",
    "happiness",
    "anxious",
];

/// Strong call-to-action verbs; matched against the CTA string.
pub const STRONG_CTA_WORDS: &[&str] = &[
    "get", "start", "try", "claim", "grab", "join", "unlock", "shop", "book", "download",
];

/// Urgency markers used by the CTR adjustment chain.
pub const URGENCY_WORDS: &[&str] = &[
    "now",
    "today",
    "hurry",
    "last chance",
    "ends soon",
    "limited time",
    "don't miss",
    "while supplies last",
];

/// Lowercases `text` and strips non-alphanumeric edges from each word.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(|w| {
        w.trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    })
}

/// Returns the distinct power words present in `text`, in lexicon order.
#[must_use]
pub fn extract_power_words(text: &str) -> Vec<String> {
    let present: Vec<String> = words(text).collect();
    POWER_WORDS
        .iter()
        .filter(|pw| present.iter().any(|w| w == *pw))
        .map(|pw| (*pw).to_string())
        .collect()
}

/// Counts power-word occurrences in `text` (repeats count).
#[must_use]
pub fn count_power_words(text: &str) -> usize {
    words(text)
        .filter(|w| POWER_WORDS.contains(&w.as_str()))
        .count()
}

/// True if any entry of `table` appears in `text`.
///
/// Plain single-word entries match whole words; entries carrying spaces or
/// symbols (phrases, "100%", "#1") match as substrings of the lowercased
/// text, since word-splitting would strip their punctuation.
#[must_use]
pub fn contains_any(text: &str, table: &[&str]) -> bool {
    let lower = text.to_lowercase();
    table.iter().any(|entry| {
        if entry.chars().all(char::is_alphanumeric) {
            words(text).any(|w| w == *entry)
        } else {
            lower.contains(entry)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_power_words_dedupes_and_preserves_lexicon_order() {
        let found = extract_power_words("Unlock your free trial now — free forever");
        assert_eq!(found, vec!["free", "now", "unlock"]);
    }

    #[test]
    fn count_power_words_counts_repeats() {
        assert_eq!(count_power_words("free free free"), 3);
    }

    #[test]
    fn contains_any_matches_phrases() {
        assert!(contains_any("Offer ends soon!", URGENCY_WORDS));
        assert!(!contains_any("a calm unhurried message", URGENCY_WORDS));
    }

    #[test]
    fn punctuation_stripped_before_matching() {
        assert!(contains_any("Get it now!", STRONG_CTA_WORDS));
        assert_eq!(count_power_words("Proven."), 1);
    }
}
