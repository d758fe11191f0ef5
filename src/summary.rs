//! summary.rs: shapes produced by the analytics aggregator, plus the
//! metadata records callers join onto per-entry results.
//!
//! Everything here is recomputed from scratch on each aggregation; nothing is
//! persisted or updated incrementally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::lexicon::Emotion;
use crate::sentiment::Sentiment;

/// Metadata for one feedback entry, index-aligned with its `SentimentResult`.
///
/// The instructor name is an exact grouping key: "Dr. Rao" and "dr. rao " are
/// different instructors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMeta {
    pub instructor: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl FeedbackMeta {
    pub fn new(instructor: impl Into<String>) -> Self {
        Self {
            instructor: instructor.into(),
            rating: None,
            timestamp: None,
        }
    }

    pub fn rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }
}

/// A raw ingestion row: the comment text plus its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRow {
    pub text: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl FeedbackRow {
    pub fn meta(&self) -> FeedbackMeta {
        FeedbackMeta {
            instructor: self.instructor.clone(),
            rating: self.rating,
            timestamp: self.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub count: usize,
    /// Share of the batch in percent, one decimal place; 0 for an empty batch.
    pub percentage: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub positive: DistributionBucket,
    pub negative: DistributionBucket,
    pub neutral: DistributionBucket,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.positive.count + self.negative.count + self.neutral.count
    }

    pub fn bucket(&self, s: Sentiment) -> &DistributionBucket {
        match s {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEmotion {
    pub emotion: Emotion,
    pub count: usize,
    pub percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub count: usize,
    pub percentage: f32,
}

/// Per-instructor rollup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructorStats {
    pub instructor: String,
    pub response_count: usize,
    /// Responses that carried a rating.
    pub rated_count: usize,
    /// Mean of present ratings; 0 when none were given.
    pub average_rating: f32,
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    /// Mean `SentimentResult::score` over the group.
    pub sentiment_score: f32,
}

/// Why an entry was surfaced for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagReason {
    Confidence,
    LowRating,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedEntry {
    /// Position of the entry in the submitted batch.
    pub index: usize,
    pub text: String,
    pub sentiment: Sentiment,
    pub score: f32,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub reason: FlagReason,
}

/// One calendar day of the sentiment trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub average_score: f32,
}

impl TrendPoint {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Complete analytics for one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_analyzed: usize,
    pub distribution: Distribution,
    pub average_score: f32,
    pub average_confidence: f32,
    /// Overall mean over rated entries; 0 when nothing was rated.
    pub average_rating: f32,
    pub top_emotions: Vec<RankedEmotion>,
    pub top_keywords: Vec<RankedKeyword>,
    pub instructor_stats: BTreeMap<String, InstructorStats>,
    pub instructors_count: usize,
    pub flagged_entries: Vec<FlaggedEntry>,
    pub flagged_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trend: Vec<TrendPoint>,
    /// Entries whose timestamp was missing or unparseable.
    #[serde(default)]
    pub undated_count: usize,
}

impl AnalyticsSummary {
    /// Instructors ordered by negative count (desc), then average rating (asc),
    /// then name.
    pub fn instructors_needing_attention(&self) -> Vec<&InstructorStats> {
        let mut v: Vec<&InstructorStats> = self.instructor_stats.values().collect();
        v.sort_by(|a, b| {
            b.negative_count
                .cmp(&a.negative_count)
                .then(a.average_rating.total_cmp(&b.average_rating))
                .then_with(|| a.instructor.cmp(&b.instructor))
        });
        v
    }

    pub fn is_empty(&self) -> bool {
        self.total_analyzed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats(name: &str, negative: usize, rating: f32) -> InstructorStats {
        InstructorStats {
            instructor: name.to_string(),
            response_count: negative + 1,
            rated_count: 1,
            average_rating: rating,
            negative_count: negative,
            ..Default::default()
        }
    }

    #[test]
    fn attention_order_matches_review_priority() {
        let mut s = AnalyticsSummary::default();
        for st in [
            stats("Asha", 1, 4.0),
            stats("Bilal", 3, 4.5),
            stats("Chen", 1, 2.5),
            stats("Dana", 0, 1.0),
        ] {
            s.instructor_stats.insert(st.instructor.clone(), st);
        }
        let names: Vec<&str> = s
            .instructors_needing_attention()
            .iter()
            .map(|st| st.instructor.as_str())
            .collect();
        assert_eq!(names, vec!["Bilal", "Chen", "Asha", "Dana"]);
    }

    #[test]
    fn row_meta_roundtrips_fields() {
        let row: FeedbackRow = serde_json::from_value(json!({
            "text": "good",
            "instructor": "Asha",
            "rating": 4,
            "timestamp": "2025-03-01"
        }))
        .unwrap();
        assert_eq!(
            row.meta(),
            FeedbackMeta::new("Asha").rating(4.0).timestamp("2025-03-01")
        );
    }

    #[test]
    fn flagged_entry_shape() {
        let e = FlaggedEntry {
            index: 2,
            text: "awful".into(),
            sentiment: Sentiment::Negative,
            score: -0.9,
            confidence: 0.95,
            instructor: Some("Asha".into()),
            rating: None,
            timestamp: None,
            reason: FlagReason::Confidence,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["sentiment"], json!("negative"));
        assert_eq!(v["reason"], json!("confidence"));
        assert!(v.get("rating").is_none());
    }
}
