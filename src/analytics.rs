//! # Analytics Aggregator
//! Pure, testable fold of per-entry `SentimentResult`s (optionally joined with
//! `FeedbackMeta`) into an `AnalyticsSummary`. No I/O; each call recomputes
//! the whole summary from its inputs.
//!
//! Flagging: an entry is flagged when it is negative AND, depending on
//! `FlagPolicy`, its confidence reaches `flag_confidence_threshold` and/or its
//! rating is at most `low_rating_threshold`. Positive and neutral entries are
//! never flagged.

use metrics::counter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyze::extract::rank_by_frequency;
use crate::error::{AnalysisError, Result};
use crate::metrics::{AGGREGATIONS, ENTRIES_FLAGGED};
use crate::sentiment::{Sentiment, SentimentAnalyzer, SentimentResult};
use crate::summary::{
    AnalyticsSummary, Distribution, DistributionBucket, FeedbackMeta, FeedbackRow, FlagReason,
    FlaggedEntry, InstructorStats, RankedEmotion, RankedKeyword,
};
use crate::trend::daily_trend;

/// Which signals may flag a negative entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagPolicy {
    /// Confidence threshold only; ratings are ignored.
    ConfidenceOnly,
    /// Rating threshold only; every negative entry must carry a rating.
    RatingOnly,
    /// Either signal suffices. Missing ratings simply do not match.
    #[default]
    ConfidenceOrRating,
}

/// Ordering of `flagged_entries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagOrder {
    /// Original submission order.
    #[default]
    Submission,
    /// Most confident first; ties keep submission order.
    ConfidenceDesc,
}

fn default_flag_confidence_threshold() -> f32 {
    0.6
}
fn default_low_rating_threshold() -> f32 {
    2.0
}
fn default_top_keywords() -> usize {
    10
}
fn default_top_emotions() -> usize {
    6
}

/// Aggregation knobs. Loaded from the `[aggregation]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationParams {
    #[serde(default = "default_flag_confidence_threshold")]
    pub flag_confidence_threshold: f32,
    #[serde(default = "default_low_rating_threshold")]
    pub low_rating_threshold: f32,
    #[serde(default)]
    pub flag_policy: FlagPolicy,
    #[serde(default)]
    pub flag_order: FlagOrder,
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
    #[serde(default = "default_top_emotions")]
    pub top_emotions: usize,
}

impl Default for AggregationParams {
    fn default() -> Self {
        Self {
            flag_confidence_threshold: default_flag_confidence_threshold(),
            low_rating_threshold: default_low_rating_threshold(),
            flag_policy: FlagPolicy::default(),
            flag_order: FlagOrder::default(),
            top_keywords: default_top_keywords(),
            top_emotions: default_top_emotions(),
        }
    }
}

impl AggregationParams {
    pub fn sanitize(&mut self) {
        if !self.flag_confidence_threshold.is_finite() {
            self.flag_confidence_threshold = default_flag_confidence_threshold();
        }
        self.flag_confidence_threshold = self.flag_confidence_threshold.clamp(0.0, 1.0);
        if !self.low_rating_threshold.is_finite() {
            self.low_rating_threshold = default_low_rating_threshold();
        }
        if self.top_keywords == 0 {
            self.top_keywords = 1;
        }
        if self.top_emotions == 0 {
            self.top_emotions = 1;
        }
    }
}

/// Fold a batch of results (and optional index-aligned metadata) into analytics.
///
/// Fails with `InvalidInput` when `metadata` is present with a different
/// length, when a rating is negative or not finite, or when the policy is
/// `RatingOnly` and a negative entry has no rating to judge.
pub fn aggregate(
    results: &[SentimentResult],
    metadata: Option<&[FeedbackMeta]>,
    params: &AggregationParams,
) -> Result<AnalyticsSummary> {
    crate::metrics::ensure_described();
    validate(results, metadata, params)?;

    let total = results.len();
    let mut summary = AnalyticsSummary {
        total_analyzed: total,
        distribution: distribution(results),
        average_score: mean(results.iter().map(|r| r.score)),
        average_confidence: mean(results.iter().map(|r| r.confidence)),
        top_emotions: top_emotions(results, params.top_emotions),
        top_keywords: top_keywords(results, params.top_keywords),
        ..Default::default()
    };

    if let Some(meta) = metadata {
        summary.average_rating = mean(meta.iter().filter_map(|m| m.rating));
        summary.instructor_stats = instructor_rollup(results, meta);
        summary.instructors_count = summary.instructor_stats.len();
        let (trend, undated) = daily_trend(results, meta);
        summary.trend = trend;
        summary.undated_count = undated;
    }

    summary.flagged_entries = flag_entries(results, metadata, params);
    summary.flagged_count = summary.flagged_entries.len();

    counter!(AGGREGATIONS).increment(1);
    counter!(ENTRIES_FLAGGED).increment(summary.flagged_count as u64);
    tracing::debug!(
        total,
        positive = summary.distribution.positive.count,
        negative = summary.distribution.negative.count,
        neutral = summary.distribution.neutral.count,
        flagged = summary.flagged_count,
        instructors = summary.instructors_count,
        "aggregated feedback batch"
    );

    Ok(summary)
}

/// Score every row and aggregate in one pass.
pub fn analyze_rows(
    analyzer: &SentimentAnalyzer,
    rows: &[FeedbackRow],
    params: &AggregationParams,
) -> Result<(Vec<SentimentResult>, AnalyticsSummary)> {
    let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
    let results = analyzer.analyze_batch(&texts);
    let meta: Vec<FeedbackMeta> = rows.iter().map(FeedbackRow::meta).collect();
    let summary = aggregate(&results, Some(meta.as_slice()), params)?;
    Ok((results, summary))
}

fn validate(
    results: &[SentimentResult],
    metadata: Option<&[FeedbackMeta]>,
    params: &AggregationParams,
) -> Result<()> {
    let Some(meta) = metadata else {
        if params.flag_policy == FlagPolicy::RatingOnly
            && results.iter().any(|r| r.sentiment == Sentiment::Negative)
        {
            return Err(AnalysisError::invalid_input(
                "rating-only flag policy requires metadata with ratings",
            ));
        }
        return Ok(());
    };

    if meta.len() != results.len() {
        return Err(AnalysisError::invalid_input(format!(
            "metadata length {} does not match results length {}",
            meta.len(),
            results.len()
        )));
    }

    for (i, (r, m)) in results.iter().zip(meta).enumerate() {
        if let Some(rating) = m.rating {
            if !rating.is_finite() || rating < 0.0 {
                return Err(AnalysisError::invalid_input(format!(
                    "entry {i}: rating {rating} is not a non-negative number"
                )));
            }
        } else if params.flag_policy == FlagPolicy::RatingOnly
            && r.sentiment == Sentiment::Negative
        {
            return Err(AnalysisError::invalid_input(format!(
                "entry {i}: rating required by rating-only flag policy"
            )));
        }
    }
    Ok(())
}

fn distribution(results: &[SentimentResult]) -> Distribution {
    let total = results.len();
    let count = |s: Sentiment| results.iter().filter(|r| r.sentiment == s).count();
    let bucket = |n: usize| DistributionBucket {
        count: n,
        percentage: percent(n, total),
    };
    Distribution {
        positive: bucket(count(Sentiment::Positive)),
        negative: bucket(count(Sentiment::Negative)),
        neutral: bucket(count(Sentiment::Neutral)),
    }
}

fn top_emotions(results: &[SentimentResult], limit: usize) -> Vec<RankedEmotion> {
    let all = results.iter().flat_map(|r| r.emotions.iter().copied());
    rank_by_frequency(all, limit)
        .into_iter()
        .map(|(emotion, count)| RankedEmotion {
            emotion,
            count,
            percentage: percent(count, results.len()),
        })
        .collect()
}

fn top_keywords(results: &[SentimentResult], limit: usize) -> Vec<RankedKeyword> {
    let all = results.iter().flat_map(|r| r.keywords.iter().cloned());
    rank_by_frequency(all, limit)
        .into_iter()
        .map(|(keyword, count)| RankedKeyword {
            keyword,
            count,
            percentage: percent(count, results.len()),
        })
        .collect()
}

#[derive(Default)]
struct GroupAcc {
    responses: usize,
    rated: usize,
    rating_sum: f32,
    positive: usize,
    neutral: usize,
    negative: usize,
    score_sum: f32,
}

fn instructor_rollup(
    results: &[SentimentResult],
    meta: &[FeedbackMeta],
) -> BTreeMap<String, InstructorStats> {
    let mut groups: BTreeMap<&str, GroupAcc> = BTreeMap::new();

    for (r, m) in results.iter().zip(meta) {
        let g = groups.entry(m.instructor.as_str()).or_default();
        g.responses += 1;
        if let Some(rating) = m.rating {
            g.rated += 1;
            g.rating_sum += rating;
        }
        match r.sentiment {
            Sentiment::Positive => g.positive += 1,
            Sentiment::Neutral => g.neutral += 1,
            Sentiment::Negative => g.negative += 1,
        }
        g.score_sum += r.score;
    }

    groups
        .into_iter()
        .map(|(name, g)| {
            let stats = InstructorStats {
                instructor: name.to_string(),
                response_count: g.responses,
                rated_count: g.rated,
                average_rating: if g.rated > 0 {
                    g.rating_sum / g.rated as f32
                } else {
                    0.0
                },
                positive_count: g.positive,
                neutral_count: g.neutral,
                negative_count: g.negative,
                sentiment_score: g.score_sum / g.responses as f32,
            };
            (name.to_string(), stats)
        })
        .collect()
}

fn flag_entries(
    results: &[SentimentResult],
    metadata: Option<&[FeedbackMeta]>,
    params: &AggregationParams,
) -> Vec<FlaggedEntry> {
    let mut flagged = Vec::new();

    for (i, r) in results.iter().enumerate() {
        if r.sentiment != Sentiment::Negative {
            continue;
        }
        let meta = metadata.map(|m| &m[i]);
        let rating = meta.and_then(|m| m.rating);

        let by_confidence = params.flag_policy != FlagPolicy::RatingOnly
            && r.confidence >= params.flag_confidence_threshold;
        let by_rating = params.flag_policy != FlagPolicy::ConfidenceOnly
            && rating.is_some_and(|x| x <= params.low_rating_threshold);

        let reason = match (by_confidence, by_rating) {
            (true, true) => FlagReason::Both,
            (true, false) => FlagReason::Confidence,
            (false, true) => FlagReason::LowRating,
            (false, false) => continue,
        };

        tracing::debug!(
            index = i,
            id = %crate::anon_id(&r.text),
            confidence = r.confidence,
            ?reason,
            "entry flagged"
        );

        flagged.push(FlaggedEntry {
            index: i,
            text: r.text.clone(),
            sentiment: r.sentiment,
            score: r.score,
            confidence: r.confidence,
            instructor: meta.map(|m| m.instructor.clone()),
            rating,
            timestamp: meta.and_then(|m| m.timestamp.clone()),
            reason,
        });
    }

    if params.flag_order == FlagOrder::ConfidenceDesc {
        flagged.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    }
    flagged
}

/// `n / total * 100`, one decimal place; 0 when `total == 0`.
fn percent(n: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    ((n as f32 / total as f32) * 1000.0).round() / 10.0
}

fn mean<I: Iterator<Item = f32>>(it: I) -> f32 {
    let (sum, n) = it.fold((0.0f32, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}
