//! # Daily Trend
//! Buckets scored entries by calendar day of their timestamp.
//!
//! Timestamps arrive as free-form strings from form/spreadsheet exports. An
//! entry whose timestamp is missing or does not parse is counted as undated
//! and left out of the trend; it never fails the aggregation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use crate::sentiment::{Sentiment, SentimentResult};
use crate::summary::{FeedbackMeta, TrendPoint};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse the calendar day out of a timestamp string.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[derive(Default)]
struct DayAcc {
    positive: usize,
    negative: usize,
    neutral: usize,
    score_sum: f32,
}

/// Returns the ascending per-day trend and the number of undated entries.
pub fn daily_trend(results: &[SentimentResult], meta: &[FeedbackMeta]) -> (Vec<TrendPoint>, usize) {
    let mut days: BTreeMap<NaiveDate, DayAcc> = BTreeMap::new();
    let mut undated = 0usize;

    for (r, m) in results.iter().zip(meta) {
        let Some(day) = m.timestamp.as_deref().and_then(parse_day) else {
            undated += 1;
            continue;
        };
        let acc = days.entry(day).or_default();
        match r.sentiment {
            Sentiment::Positive => acc.positive += 1,
            Sentiment::Negative => acc.negative += 1,
            Sentiment::Neutral => acc.neutral += 1,
        }
        acc.score_sum += r.score;
    }

    let points = days
        .into_iter()
        .map(|(date, acc)| {
            let n = acc.positive + acc.negative + acc.neutral;
            TrendPoint {
                date,
                positive: acc.positive,
                negative: acc.negative,
                neutral: acc.neutral,
                average_score: acc.score_sum / n as f32,
            }
        })
        .collect();

    (points, undated)
}
