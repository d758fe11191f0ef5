//! # Lexicon Store
//!
//! Word → polarity weight (roughly -1.0..=1.0) plus optional emotion tags,
//! together with the negator, intensifier and stop-word sets used by the
//! normalizer and scorer.
//!
//! The built-in lexicon ships as `assets/lexicon.json` and is parsed once per
//! process. A `Lexicon` is never mutated after construction; share it through
//! `Arc` and read it from any thread without locking.
//!
//! JSON shape:
//! ```json
//! {
//!   "words": { "excellent": { "weight": 0.9, "emotions": ["joy"] } },
//!   "negators": ["not", "never"],
//!   "intensifiers": { "very": 1.5 },
//!   "stop_words": ["the", "a"]
//! }
//! ```

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, Result};
use crate::normalize::is_token;

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../assets/lexicon.json");
    Arc::new(Lexicon::from_json_str(raw).expect("valid built-in lexicon"))
});

/// Emotion categories a lexicon word can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Anger,
    Sadness,
    Fear,
    Surprise,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Disgust => "disgust",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexicon word: signed polarity weight and zero or more emotion tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub weight: f32,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
}

#[derive(Debug, Deserialize)]
struct RawLexicon {
    #[serde(default)]
    words: HashMap<String, LexiconEntry>,
    #[serde(default)]
    negators: Vec<String>,
    #[serde(default)]
    intensifiers: HashMap<String, f32>,
    #[serde(default)]
    stop_words: Vec<String>,
}

/// Immutable lookup tables for scoring and extraction.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashMap<String, LexiconEntry>,
    negators: HashSet<String>,
    intensifiers: HashMap<String, f32>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    /// Process-wide built-in lexicon.
    pub fn builtin() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Parse and validate a lexicon from its JSON form.
    ///
    /// Keys are case-normalized and must be single tokens as `normalize` emits
    /// them; two keys that collide after normalization are rejected. Weights
    /// and intensifier factors must be finite.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: RawLexicon = serde_json::from_str(raw)?;

        let mut words = HashMap::with_capacity(parsed.words.len());
        for (word, mut entry) in parsed.words {
            if !entry.weight.is_finite() {
                return Err(AnalysisError::lexicon(format!(
                    "weight for `{word}` is not finite"
                )));
            }
            let mut seen = Vec::with_capacity(entry.emotions.len());
            entry.emotions.retain(|e| {
                let fresh = !seen.contains(e);
                seen.push(*e);
                fresh
            });
            insert_unique(&mut words, token_key(&word, "word")?, entry, "word")?;
        }

        let mut intensifiers = HashMap::with_capacity(parsed.intensifiers.len());
        for (word, factor) in parsed.intensifiers {
            if !factor.is_finite() || factor < 0.0 {
                return Err(AnalysisError::lexicon(format!(
                    "intensifier `{word}` must have a finite, non-negative factor"
                )));
            }
            let key = token_key(&word, "intensifier")?;
            insert_unique(&mut intensifiers, key, factor, "intensifier")?;
        }

        Ok(Self {
            words,
            negators: token_set(parsed.negators, "negator")?,
            intensifiers,
            stop_words: token_set(parsed.stop_words, "stop word")?,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("parsing lexicon at {}", path.display()))
    }

    #[inline]
    pub fn entry(&self, word: &str) -> Option<&LexiconEntry> {
        self.words.get(word)
    }

    /// Polarity weight of `word` (0.0 when absent).
    #[inline]
    pub fn weight(&self, word: &str) -> f32 {
        self.words.get(word).map(|e| e.weight).unwrap_or(0.0)
    }

    #[inline]
    pub fn is_negator(&self, word: &str) -> bool {
        self.negators.contains(word)
    }

    /// Magnitude multiplier for an intensifier (or diminisher) word.
    #[inline]
    pub fn intensifier(&self, word: &str) -> Option<f32> {
        self.intensifiers.get(word).copied()
    }

    #[inline]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Case-normalize a key and check it can actually come out of the tokenizer.
fn token_key(raw: &str, kind: &str) -> Result<String> {
    let key = raw.trim().to_lowercase();
    if !is_token(&key) {
        return Err(AnalysisError::lexicon(format!(
            "{kind} `{raw}` is not a single word token"
        )));
    }
    Ok(key)
}

fn insert_unique<V>(map: &mut HashMap<String, V>, key: String, value: V, kind: &str) -> Result<()> {
    if map.contains_key(&key) {
        return Err(AnalysisError::lexicon(format!(
            "duplicate {kind} `{key}` after case normalization"
        )));
    }
    map.insert(key, value);
    Ok(())
}

fn token_set(items: Vec<String>, kind: &str) -> Result<HashSet<String>> {
    items.iter().map(|s| token_key(s, kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_loads_and_is_shared() {
        let a = Lexicon::builtin();
        let b = Lexicon::builtin();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_empty());
        assert!(a.weight("excellent") > 0.0);
        assert!(a.weight("terrible") < 0.0);
        assert_eq!(a.weight("instructor"), 0.0);
    }

    #[test]
    fn builtin_weights_stay_in_unit_range() {
        let lex = Lexicon::builtin();
        for (word, entry) in &lex.words {
            assert!(
                (-1.0..=1.0).contains(&entry.weight),
                "{word} has weight {}",
                entry.weight
            );
        }
    }

    #[test]
    fn sets_are_case_normalized() {
        let lex = Lexicon::from_json_str(
            r#"{
                "words": { "Great": { "weight": 0.8, "emotions": ["joy"] } },
                "negators": ["NOT"],
                "intensifiers": { "Very": 1.5 },
                "stop_words": ["The"]
            }"#,
        )
        .unwrap();
        assert_eq!(lex.entry("great").unwrap().emotions, vec![Emotion::Joy]);
        assert!(lex.is_negator("not"));
        assert_eq!(lex.intensifier("very"), Some(1.5));
        assert!(lex.is_stop_word("the"));
    }

    #[test]
    fn rejects_case_colliding_words() {
        let err = Lexicon::from_json_str(
            r#"{ "words": { "Great": { "weight": 0.8 }, "great": { "weight": -0.9 } } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate word `great`"));

        let err = Lexicon::from_json_str(r#"{ "intensifiers": { "VERY": 1.5, "very": 2.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Lexicon { .. }));
    }

    #[test]
    fn rejects_keys_the_tokenizer_never_emits() {
        for raw in [
            r#"{ "words": { "must-see": { "weight": 0.7 } } }"#,
            r#"{ "words": { "well done": { "weight": 0.7 } } }"#,
            r#"{ "negators": ["not at all"] }"#,
            r#"{ "stop_words": [""] }"#,
        ] {
            let err = Lexicon::from_json_str(raw).unwrap_err();
            assert!(err.to_string().contains("not a single word token"), "{raw}");
        }
        // Surrounding whitespace and case are normalized, not rejected.
        let lex = Lexicon::from_json_str(r#"{ "words": { " Must ": { "weight": 0.1 } } }"#).unwrap();
        assert_eq!(lex.weight("must"), 0.1);
    }

    #[test]
    fn rejects_negative_intensifier() {
        let err = Lexicon::from_json_str(r#"{ "intensifiers": { "very": -2.0 } }"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Lexicon { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Lexicon::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, AnalysisError::Lexicon { .. }));
    }
}
