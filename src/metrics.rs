//! Metric names and one-time descriptions.
//!
//! The library only emits through the `metrics` facade; installing a recorder
//! (Prometheus or otherwise) is left to the host process. Without one, every
//! call is a no-op.

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

pub const ENTRIES_SCORED: &str = "feedback_entries_scored_total";
pub const ENTRIES_FLAGGED: &str = "feedback_entries_flagged_total";
pub const AGGREGATIONS: &str = "feedback_aggregations_total";
pub const BATCH_SIZE: &str = "feedback_batch_size";

/// Register descriptions once so series show up with help text.
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(ENTRIES_SCORED, "Feedback entries scored by the batch analyzer.");
        describe_counter!(
            ENTRIES_FLAGGED,
            "Entries flagged for review (negative and confident or low-rated)."
        );
        describe_counter!(AGGREGATIONS, "Successful analytics aggregations.");
        describe_histogram!(BATCH_SIZE, "Number of texts per analyzed batch.");
    });
}
