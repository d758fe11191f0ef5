//! Signed-lexicon scorer with negation and intensifier look-behind.
//!
//! For each token with a non-zero lexicon weight:
//! - scan up to `negation_window` preceding tokens (nearest first), stopping
//!   at the previous sentiment-bearing token;
//! - a negator in that span flips the sign, an intensifier scales the
//!   magnitude by its factor (nearest intensifier wins).
//!
//! `score` is the mean of the matched contributions, clipped to [-1, 1], so
//! long comments are not biased towards the extremes. `confidence` blends the
//! score magnitude with match density (matched / total tokens) on top of a
//! fixed floor; text with no matches gets exactly the floor.

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::sentiment::Sentiment;

fn default_positive_threshold() -> f32 {
    0.1
}
fn default_negative_threshold() -> f32 {
    -0.1
}
fn default_negation_window() -> usize {
    2
}
fn default_confidence_floor() -> f32 {
    0.3
}
fn default_magnitude_weight() -> f32 {
    0.5
}
fn default_density_weight() -> f32 {
    0.2
}
fn default_keyword_limit() -> usize {
    5
}

/// Tunable scoring constants. Loaded from the `[scoring]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// `score > positive_threshold` classifies as positive.
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f32,
    /// `score < negative_threshold` classifies as negative.
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f32,
    /// Number of preceding tokens checked for negators/intensifiers.
    #[serde(default = "default_negation_window")]
    pub negation_window: usize,
    /// Confidence reported when nothing matched.
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f32,
    #[serde(default = "default_magnitude_weight")]
    pub magnitude_weight: f32,
    #[serde(default = "default_density_weight")]
    pub density_weight: f32,
    /// Max keywords kept per entry.
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            negation_window: default_negation_window(),
            confidence_floor: default_confidence_floor(),
            magnitude_weight: default_magnitude_weight(),
            density_weight: default_density_weight(),
            keyword_limit: default_keyword_limit(),
        }
    }
}

impl ScoringParams {
    /// Repair out-of-range values in place (non-finite → default, inverted
    /// thresholds swapped, probabilities clamped).
    pub fn sanitize(&mut self) {
        if !self.positive_threshold.is_finite() {
            self.positive_threshold = default_positive_threshold();
        }
        if !self.negative_threshold.is_finite() {
            self.negative_threshold = default_negative_threshold();
        }
        if self.negative_threshold > self.positive_threshold {
            std::mem::swap(&mut self.negative_threshold, &mut self.positive_threshold);
        }
        if self.negation_window == 0 {
            self.negation_window = 1;
        }
        self.confidence_floor = finite_or(self.confidence_floor, default_confidence_floor())
            .clamp(0.0, 1.0);
        self.magnitude_weight =
            finite_or(self.magnitude_weight, default_magnitude_weight()).max(0.0);
        self.density_weight = finite_or(self.density_weight, default_density_weight()).max(0.0);
        if self.keyword_limit == 0 {
            self.keyword_limit = 1;
        }
    }
}

/// Result of scoring one token sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    pub score: f32,
    pub sentiment: Sentiment,
    pub confidence: f32,
    /// Tokens with a non-zero lexicon contribution.
    pub matched: usize,
    pub total: usize,
}

/// Score a normalized token sequence. Total over its input: empty or unmatched
/// sequences score 0.0, neutral, at the confidence floor.
pub fn score_tokens(tokens: &[String], lexicon: &Lexicon, params: &ScoringParams) -> ScoreOutcome {
    let mut sum = 0.0f32;
    let mut matched = 0usize;

    for (i, tok) in tokens.iter().enumerate() {
        let base = lexicon.weight(tok);
        if base == 0.0 {
            continue;
        }

        let (negated, factor) = look_behind(tokens, i, lexicon, params.negation_window);
        let mut w = base * factor;
        if negated {
            w = -w;
        }

        sum += w;
        matched += 1;
    }

    let score = if matched > 0 {
        (sum / matched as f32).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    ScoreOutcome {
        score,
        sentiment: classify(score, params),
        confidence: confidence(score, matched, tokens.len(), params),
        matched,
        total: tokens.len(),
    }
}

/// Map a score onto positive / neutral / negative using fixed thresholds.
pub fn classify(score: f32, params: &ScoringParams) -> Sentiment {
    if score > params.positive_threshold {
        Sentiment::Positive
    } else if score < params.negative_threshold {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Monotone in `|score|` and in match density; clamped to [0, 1].
pub fn confidence(score: f32, matched: usize, total: usize, params: &ScoringParams) -> f32 {
    if matched == 0 || total == 0 {
        return params.confidence_floor;
    }
    let density = matched as f32 / total as f32;
    (params.confidence_floor + params.magnitude_weight * score.abs() + params.density_weight * density)
        .clamp(0.0, 1.0)
}

/// Returns `(negated, intensifier_factor)` for the token at `i`.
fn look_behind(tokens: &[String], i: usize, lexicon: &Lexicon, window: usize) -> (bool, f32) {
    let mut negated = false;
    let mut factor: Option<f32> = None;

    for k in 1..=window {
        if i < k {
            break;
        }
        let prev = tokens[i - k].as_str();
        // A previous sentiment word owns everything before it.
        if lexicon.weight(prev) != 0.0 {
            break;
        }
        if lexicon.is_negator(prev) {
            negated = true;
        }
        if factor.is_none() {
            factor = lexicon.intensifier(prev);
        }
    }

    (negated, factor.unwrap_or(1.0))
}

fn finite_or(x: f32, fallback: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}
