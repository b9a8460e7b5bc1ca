//! Forgiving answer normalization.
//!
//! Both the canonical answer and the user's answer go through [`normalize_answer`]
//! before an exact string comparison. Steps, in order:
//!
//! 1. absent input becomes the empty string
//! 2. compatibility decomposition (NFKD), then combining marks are dropped
//! 3. lowercase
//! 4. whole-word number words `zero`..`twelve` become digits
//! 5. everything except ASCII digits, ASCII lowercase letters and whitespace is removed
//! 6. whitespace runs collapse to one space and the ends are trimmed
//!
//! Step 4 runs before punctuation removal, so `"twelve-year"` becomes `"12year"` and
//! `"seven-teen"` becomes `"7teen"`, never `"17"`. Step 4 is applied once more to the
//! final string: removing punctuation can expose a number word (`"o-ne"` -> `"one"`),
//! and without the second pass normalizing twice would not give the same result.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Number words replaced by their digits.
pub const NUMBER_WORDS: [(&str, &str); 13] = [
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
];

static NUMBER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = NUMBER_WORDS
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).unwrap_or_else(|e| {
        unreachable!("number word pattern is built from fixed literals: {e}")
    })
});

/// Normalize an answer for forgiving comparison.
///
/// ```
/// use quiz_core::normalize_answer;
///
/// assert_eq!(normalize_answer(Some("Café!")), "cafe");
/// assert_eq!(normalize_answer(Some("  Seven  ")), "7");
/// assert_eq!(normalize_answer(None), "");
/// ```
#[must_use]
pub fn normalize_answer(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return String::new();
    };

    let folded: String = raw.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = folded.to_lowercase();
    let digits = replace_number_words(&lowered);

    let stripped: String = digits
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    replace_number_words(&collapsed)
}

/// Returns true when both answers normalize to the same string.
#[must_use]
pub fn answers_match(canonical: &str, candidate: Option<&str>) -> bool {
    match candidate {
        Some(candidate) => normalize_answer(Some(canonical)) == normalize_answer(Some(candidate)),
        None => false,
    }
}

fn replace_number_words(s: &str) -> String {
    NUMBER_WORD_RE
        .replace_all(s, |caps: &Captures<'_>| {
            let word = &caps[0];
            NUMBER_WORDS
                .iter()
                .find(|(w, _)| *w == word)
                .map_or(word, |(_, digit)| *digit)
                .to_owned()
        })
        .into_owned()
}
