//! Pipeline metrics.
//!
//! Emitted through the `metrics` facade. The binary installs no recorder, so
//! these are no-ops unless an embedding application provides one.

use crate::types::Category;

/// Metrics for the load/normalize/aggregate phases
pub struct MashupMetrics;

impl MashupMetrics {
    pub fn record_normalized(category: Category, count: usize) {
        ::metrics::counter!("mashup_records_normalized_total", "category" => category.as_str())
            .increment(count as u64);
    }

    /// Records dropped for lacking usable coordinates
    pub fn record_dropped(category: Category, count: usize) {
        ::metrics::counter!("mashup_records_dropped_total", "category" => category.as_str())
            .increment(count as u64);
    }

    pub fn record_missing_source(source_key: &str) {
        ::metrics::counter!("mashup_sources_missing_total", "source" => source_key.to_string())
            .increment(1);
    }

    pub fn record_load_duration(source_key: &str, duration_secs: f64) {
        ::metrics::histogram!("mashup_source_load_duration_seconds", "source" => source_key.to_string())
            .record(duration_secs);
    }
}
