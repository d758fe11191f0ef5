use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::analyze::batch;
use crate::analyze::extract::extract;
use crate::analyze::scoring::{score_tokens, ScoreOutcome, ScoringParams};
use crate::lexicon::Lexicon;
use crate::normalize::{content_tokens, normalize};

pub use crate::lexicon::Emotion;

/// Three-way classification derived from `SentimentResult::score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-entry scoring output. `text` is the caller's input, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub text: String,
    pub score: f32,
    pub sentiment: Sentiment,
    pub confidence: f32,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Scoring facade over a shared, immutable lexicon.
///
/// Cheap to clone; every method is pure, so one analyzer can serve any number
/// of threads.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
    params: ScoringParams,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Built-in lexicon with default scoring parameters.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::builtin(), ScoringParams::default())
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>, mut params: ScoringParams) -> Self {
        params.sanitize();
        Self { lexicon, params }
    }

    pub fn with_params(params: ScoringParams) -> Self {
        Self::with_lexicon(Lexicon::builtin(), params)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score only: `(score, sentiment, confidence)` plus match counts.
    pub fn score_text(&self, text: &str) -> ScoreOutcome {
        score_tokens(&normalize(text), &self.lexicon, &self.params)
    }

    /// Full per-entry analysis: score, class, confidence, emotions, keywords.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = normalize(text);
        let content = content_tokens(&tokens, &self.lexicon);

        let outcome = score_tokens(&tokens, &self.lexicon, &self.params);
        let extraction = extract(&tokens, &content, &self.lexicon, self.params.keyword_limit);

        SentimentResult {
            text: text.to_string(),
            score: outcome.score,
            sentiment: outcome.sentiment,
            confidence: outcome.confidence,
            emotions: extraction.emotions,
            keywords: extraction.keywords,
        }
    }

    /// One result per input, same order as the input.
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Vec<SentimentResult>
    where
        S: AsRef<str> + Sync,
    {
        batch::analyze_batch(self, texts)
    }
}
