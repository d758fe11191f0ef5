//! Batch analysis: one `SentimentResult` per input text, input order kept.
//!
//! Entries share no mutable state, so with the `parallel` feature the batch is
//! scored on the rayon pool. Indexed parallel collection preserves order, so
//! the output is identical to the sequential path.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use metrics::{counter, histogram};

use crate::metrics::{BATCH_SIZE, ENTRIES_SCORED};
use crate::sentiment::{SentimentAnalyzer, SentimentResult};

pub fn analyze_batch<S>(analyzer: &SentimentAnalyzer, texts: &[S]) -> Vec<SentimentResult>
where
    S: AsRef<str> + Sync,
{
    crate::metrics::ensure_described();

    #[cfg(feature = "parallel")]
    let out: Vec<SentimentResult> = texts
        .par_iter()
        .map(|t| analyzer.analyze(t.as_ref()))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let out: Vec<SentimentResult> = texts.iter().map(|t| analyzer.analyze(t.as_ref())).collect();

    histogram!(BATCH_SIZE).record(texts.len() as f64);
    counter!(ENTRIES_SCORED).increment(out.len() as u64);
    tracing::debug!(entries = out.len(), "batch scored");
    out
}
