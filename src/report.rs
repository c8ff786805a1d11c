//! Output artifacts: the merged record array and its metadata document.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Config, OutputConfig, SourceAttribution};
use crate::error::Result;
use crate::pipeline::AggregateResult;
use crate::types::{Category, UnifiedRecord};

/// Human-readable description of every unified record field, in record order.
pub const SCHEMA_FIELDS: &[(&str, &str)] = &[
    ("category", "Disaster type (aviation_accident, shipwreck, storm, earthquake)"),
    ("latitude", "Decimal degrees (-90 to 90)"),
    ("longitude", "Decimal degrees (-180 to 180)"),
    ("name", "Event name or location"),
    ("date", "Event date (YYYY-MM-DD)"),
    ("subcategory", "Specific type within category"),
    ("magnitude", "For earthquakes/storms: magnitude/intensity"),
    ("fatalities", "Number of deaths (storms)"),
    ("injuries", "Number of injuries (storms)"),
    ("damage", "Reported property damage (storms)"),
    ("state", "US state (storms)"),
    ("aircraft_type", "Aircraft make and model (aviation accidents)"),
    ("event_id", "Source event identifier (aviation accidents)"),
    ("vessel_type", "Vessel type (shipwrecks)"),
    ("cargo", "Cargo carried (shipwrecks)"),
    ("depth_km", "Hypocenter depth in kilometers (earthquakes)"),
];

const BANNER_WIDTH: usize = 60;

/// Source attributions keyed by source key, serialized in merge order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributions(pub Vec<(String, SourceAttribution)>);

impl Serialize for Attributions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, attribution)| (key, attribution)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescription(pub &'static [(&'static str, &'static str)]);

impl Serialize for SchemaDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(field, doc)| (field, doc)))
    }
}

/// Descriptive metadata written next to the merged records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub record_count: usize,
    pub categories: BTreeMap<Category, usize>,
    pub sources: Attributions,
    pub created: DateTime<Utc>,
    pub schema: SchemaDescription,
}

impl Metadata {
    pub fn from_result(result: &AggregateResult, config: &Config, created: DateTime<Utc>) -> Self {
        Self {
            title: config.dataset.title.clone(),
            description: config.dataset.description.clone(),
            record_count: result.total(),
            categories: result.category_counts.clone(),
            sources: Attributions(
                config
                    .sources
                    .iter()
                    .map(|s| (s.key.clone(), s.attribution.clone()))
                    .collect(),
            ),
            created,
            schema: SchemaDescription(SCHEMA_FIELDS),
        }
    }
}

/// Where the written artifacts ended up
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub records_path: PathBuf,
    pub metadata_path: PathBuf,
    pub records_bytes: u64,
}

impl ReportOutcome {
    pub fn records_megabytes(&self) -> f64 {
        self.records_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Persists the merged records and metadata
pub trait ReportSink {
    fn write(&self, records: &[UnifiedRecord], metadata: &Metadata) -> Result<ReportOutcome>;
}

/// Writes compact records JSON and pretty metadata JSON into the output directory
pub struct FsReportSink {
    output: OutputConfig,
}

impl FsReportSink {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }
}

impl ReportSink for FsReportSink {
    /// Both files are staged under `.tmp` names and only renamed into place
    /// once both have been written; a failed write leaves no artifacts behind.
    fn write(&self, records: &[UnifiedRecord], metadata: &Metadata) -> Result<ReportOutcome> {
        fs::create_dir_all(&self.output.dir)?;

        let records_path = self.output.records_path();
        let metadata_path = self.output.metadata_path();
        let records_staged = staging_path(&records_path);
        let metadata_staged = staging_path(&metadata_path);

        let staged = write_json(&records_staged, records, false)
            .and_then(|_| write_json(&metadata_staged, metadata, true));
        if let Err(e) = staged {
            discard_staged(&[records_staged.as_path(), metadata_staged.as_path()]);
            return Err(e);
        }

        if let Err(e) = fs::rename(&records_staged, &records_path) {
            discard_staged(&[records_staged.as_path(), metadata_staged.as_path()]);
            return Err(e.into());
        }
        info!("Wrote {} records to {}", records.len(), records_path.display());

        if let Err(e) = fs::rename(&metadata_staged, &metadata_path) {
            discard_staged(&[records_path.as_path(), metadata_staged.as_path()]);
            return Err(e.into());
        }
        info!("Wrote metadata to {}", metadata_path.display());

        let records_bytes = fs::metadata(&records_path)?.len();
        Ok(ReportOutcome {
            records_path,
            metadata_path,
            records_bytes,
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

fn discard_staged(paths: &[&Path]) {
    for path in paths {
        if !path.is_file() {
            continue;
        }
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove staged file {}: {}", path.display(), e);
        }
    }
}

/// Format a count with comma thousands separators.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Console report for a finished run.
pub struct RunSummary<'a> {
    pub result: &'a AggregateResult,
    pub outcome: &'a ReportOutcome,
}

impl<'a> RunSummary<'a> {
    pub fn new(result: &'a AggregateResult, outcome: &'a ReportOutcome) -> Self {
        Self { result, outcome }
    }
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);

        writeln!(f, "{banner}")?;
        writeln!(f, "DISASTER MASHUP DATASET CREATOR")?;
        writeln!(f, "{banner}")?;

        for source in &self.result.sources {
            writeln!(f, "\nLoading {}...", source.key)?;
            if source.missing {
                writeln!(f, "  Warning: {} not found", source.path.display())?;
            }
            writeln!(f, "  Loaded {} records", format_count(source.loaded))?;
        }

        writeln!(f, "\n{banner}")?;
        writeln!(f, "TOTAL RECORDS: {}", format_count(self.result.total()))?;
        for (category, count) in &self.result.category_counts {
            writeln!(f, "  {}: {}", category, format_count(*count))?;
        }

        writeln!(f, "\nSaved to: {}", self.outcome.records_path.display())?;
        writeln!(f, "File size: {:.2} MB", self.outcome.records_megabytes())?;
        writeln!(f, "Metadata saved to: {}", self.outcome.metadata_path.display())
    }
}
