// src/lib.rs
//! Lexicon-based sentiment analysis for course and instructor feedback.
//!
//! ```
//! use feedback_sentiment::{aggregate, AggregationParams, SentimentAnalyzer, Sentiment};
//!
//! let analyzer = SentimentAnalyzer::new();
//! let results = analyzer.analyze_batch(&["The instructor was excellent and clear", "not good"]);
//! assert_eq!(results[0].sentiment, Sentiment::Positive);
//! assert_eq!(results[1].sentiment, Sentiment::Negative);
//!
//! let summary = aggregate(&results, None, &AggregationParams::default()).unwrap();
//! assert_eq!(summary.distribution.total(), 2);
//! ```

pub mod analytics;
pub mod analyze;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod normalize;
pub mod sentiment;
pub mod summary;
pub mod trend;

// ---- Re-exports for stable public API ----
pub use crate::analytics::{aggregate, analyze_rows, AggregationParams, FlagOrder, FlagPolicy};
pub use crate::analyze::scoring::ScoringParams;
pub use crate::config::{EngineConfig, HotReloadConfig};
pub use crate::error::{AnalysisError, Result};
pub use crate::lexicon::{Emotion, Lexicon, LexiconEntry};
pub use crate::normalize::normalize;
pub use crate::sentiment::{Sentiment, SentimentAnalyzer, SentimentResult};
pub use crate::summary::{
    AnalyticsSummary, Distribution, DistributionBucket, FeedbackMeta, FeedbackRow, FlagReason,
    FlaggedEntry, InstructorStats, RankedEmotion, RankedKeyword, TrendPoint,
};

/// Short anonymized id for a feedback text (first 6 bytes of SHA-256, hex).
/// Logs carry this instead of the raw comment.
pub fn anon_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_id_is_stable_and_short() {
        let a = anon_id("the pace was awful");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, anon_id("the pace was awful"));
        assert_ne!(a, anon_id("the pace was fine"));
    }
}
