//! Listing label extraction from free-text questions.
//!
//! Ordered pattern attempts, first match wins. The strict 3-letter
//! abbreviation rule runs before the generic word-pair rule so that
//! abbreviations get uppercased instead of being captured with their
//! original casing by the looser pattern.

use std::sync::LazyLock;

use regex::Regex;

/// Fallback truncation length when no pattern matches.
const MAX_LISTING_LEN: usize = 50;

static RE_ABBREV_VS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z]{3})\b\s+vs\.?\s+\b([A-Za-z]{3})\b").unwrap()
});
static RE_WORD_VS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z0-9]+)\s+vs\.?\s+([A-Za-z0-9]+)\b").unwrap()
});
static RE_TO_BEAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([A-Za-z0-9]+)\s+to\s+beat\s+([A-Za-z0-9]+)\b").unwrap()
});

/// Derive a short human-readable listing label ("RAC vs FLA") from a market
/// question. Total: returns `""` for empty input and a 50-character
/// truncation when nothing matches.
pub fn extract_listing(question: &str) -> String {
    if question.is_empty() {
        return String::new();
    }

    if let Some(c) = RE_ABBREV_VS.captures(question) {
        return format!("{} vs {}", c[1].to_uppercase(), c[2].to_uppercase());
    }
    if let Some(c) = RE_WORD_VS.captures(question) {
        return format!("{} vs {}", &c[1], &c[2]);
    }
    if let Some(c) = RE_TO_BEAT.captures(question) {
        return format!("{} vs {}", &c[1], &c[2]);
    }

    question.chars().take(MAX_LISTING_LEN).collect()
}
