//! Fixed keyword lexicons used by the scorers.
//!
//! English plus the French variants the product shipped with. Other
//! languages simply never match, which reads as "no hook keyword" or
//! "no CTA" rather than an error.

/// Phrases that mark a deliberate hook in the transcript opening.
pub const HOOK_PHRASES: &[&str] = &[
    "wait",
    "stop",
    "secret",
    "you need",
    "listen",
    "watch this",
    "attention",
    "did you know",
    "tu savais",
    "regarde",
    "attends",
];

/// Filler words and hesitation markers counted per transcript.
pub const FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "sort of",
    "kind of",
    "euh",
    "ben",
    "genre",
];

/// Call-to-action phrases searched for in the outro window.
pub const CTA_PHRASES: &[&str] = &[
    "subscribe",
    "follow",
    "like",
    "comment",
    "share",
    "link in bio",
    "abonnez",
    "clique",
];

/// Count non-overlapping occurrences of `phrase` in `text`, requiring
/// word boundaries on both sides so "like" does not match "unlike".
///
/// Both arguments must already be lowercased.
pub fn count_phrase(text: &str, phrase: &str) -> u32 {
    let mut count = 0;
    for (idx, _) in text.match_indices(phrase) {
        let before_ok = idx == 0
            || text[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        let after = idx + phrase.len();
        let after_ok = after >= text.len()
            || text[after..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            count += 1;
        }
    }
    count
}

/// True when any phrase from the lexicon occurs in `text` (lowercased,
/// word-boundary matched).
pub fn contains_any(text: &str, lexicon: &[&str]) -> bool {
    lexicon.iter().any(|phrase| count_phrase(text, phrase) > 0)
}
