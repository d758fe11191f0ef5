//! Text normalization: lowercase word tokens in original order.
//!
//! Two views are produced from the same token stream:
//! - `normalize`      : every word token, order preserved. Scoring runs on this
//!   view because negation and intensifier look-behind needs the stop words.
//! - `content_tokens` : stop words, short tokens and bare numbers removed; used
//!   for keyword extraction only.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;

/// Minimum length (in chars) for a token to count as a keyword candidate.
pub const MIN_CONTENT_TOKEN_CHARS: usize = 3;

// Letters/digits (with combining marks, so NFD text stays whole), inner
// apostrophes kept so `isn't` stays one token.
static RE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}\p{M}]+(?:'[\p{L}\p{N}\p{M}]+)*").expect("word regex")
});

/// Split `text` into lowercase word tokens; punctuation acts as a separator.
///
/// Empty or punctuation-only input yields an empty vector.
pub fn normalize(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    // Typographic apostrophes from spreadsheet/form exports.
    let lowered = text.replace(['\u{2019}', '\u{2018}'], "'").to_lowercase();
    RE_WORD
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Keyword candidates: drops stop words, negators, intensifiers, tokens
/// shorter than `MIN_CONTENT_TOKEN_CHARS` and purely numeric tokens.
pub fn content_tokens(tokens: &[String], lexicon: &Lexicon) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.chars().count() >= MIN_CONTENT_TOKEN_CHARS)
        .filter(|t| !t.chars().all(|c| c.is_numeric()))
        .filter(|t| !lexicon.is_stop_word(t) && !lexicon.is_negator(t))
        .filter(|t| lexicon.intensifier(t).is_none())
        .cloned()
        .collect()
}

/// True when `word` is exactly one token as `normalize` would emit it.
pub fn is_token(word: &str) -> bool {
    RE_WORD
        .find(word)
        .is_some_and(|m| m.start() == 0 && m.end() == word.len())
        && word.to_lowercase() == word
}

/// Re-join tokens with single spaces (the string form of a normalized text).
pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}
