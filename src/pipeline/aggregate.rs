use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::metrics::MashupMetrics;
use crate::pipeline::loader::{load_and_normalize, RecordSource};
use crate::types::{Category, UnifiedRecord};

/// Per-source load outcome, in merge order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub key: String,
    pub category: Category,
    pub path: PathBuf,
    pub loaded: usize,
    pub dropped: usize,
    pub missing: bool,
}

/// The merged dataset.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    /// Records in source order, then file order within each source
    pub records: Vec<UnifiedRecord>,
    /// Only categories with at least one record appear; iteration is alphabetical
    pub category_counts: BTreeMap<Category, usize>,
    pub sources: Vec<SourceSummary>,
}

impl AggregateResult {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn count_for(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Load every configured source in order and merge the results.
///
/// Any source that exists but cannot be read or parsed aborts the run.
#[instrument(skip_all, fields(sources = config.sources.len()))]
pub fn aggregate(reader: &dyn RecordSource, config: &Config) -> Result<AggregateResult> {
    let mut result = AggregateResult::default();

    for source in &config.sources {
        let path = config.source_path(source);
        info!("Loading {} ({})", source.key, source.category);

        let started = Instant::now();
        let load = load_and_normalize(reader, &path, source.category)?;
        MashupMetrics::record_load_duration(&source.key, started.elapsed().as_secs_f64());

        if load.missing {
            MashupMetrics::record_missing_source(&source.key);
        }
        MashupMetrics::record_normalized(source.category, load.records.len());
        MashupMetrics::record_dropped(source.category, load.dropped());

        info!(
            "Loaded {} {} records ({} dropped without coordinates)",
            load.records.len(),
            source.key,
            load.dropped()
        );

        result.sources.push(SourceSummary {
            key: source.key.clone(),
            category: source.category,
            path,
            loaded: load.records.len(),
            dropped: load.dropped(),
            missing: load.missing,
        });

        for record in &load.records {
            *result.category_counts.entry(record.category).or_insert(0) += 1;
        }
        result.records.extend(load.records);
    }

    info!("Aggregated {} records", result.total());
    Ok(result)
}
