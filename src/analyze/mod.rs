// src/analyze/mod.rs
//! Per-entry analysis pipeline: scoring, emotion/keyword extraction, and the
//! batch driver that fans entries out across threads.

pub mod batch;
pub mod extract;
pub mod scoring;

// Re-export convenient types.
pub use crate::analyze::batch::analyze_batch;
pub use crate::analyze::extract::{extract, rank_by_frequency, Extraction};
pub use crate::analyze::scoring::{classify, confidence, score_tokens, ScoreOutcome, ScoringParams};
