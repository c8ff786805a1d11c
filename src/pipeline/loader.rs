use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::error::{MashupError, Result};
use crate::pipeline::normalize::normalize_record;
use crate::types::{Category, RawRecord, UnifiedRecord};

/// Reads one source's raw records.
pub trait RecordSource {
    /// `Ok(None)` means the source does not exist, which callers treat as
    /// zero records. A source that exists but cannot be read or parsed is an error.
    fn read_records(&self, path: &Path) -> Result<Option<Vec<RawRecord>>>;
}

/// Reads sources stored as JSON arrays of objects on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileSource;

impl RecordSource for JsonFileSource {
    fn read_records(&self, path: &Path) -> Result<Option<Vec<RawRecord>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| MashupError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<RawRecord> =
            serde_json::from_str(&content).map_err(|source| MashupError::MalformedSource {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Some(records))
    }
}

/// In-memory record source for development/testing
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    sources: HashMap<PathBuf, Vec<RawRecord>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, records: Vec<RawRecord>) {
        self.sources.insert(path.into(), records);
    }
}

impl RecordSource for InMemorySource {
    fn read_records(&self, path: &Path) -> Result<Option<Vec<RawRecord>>> {
        Ok(self.sources.get(path).cloned())
    }
}

/// Outcome of loading a single source
#[derive(Debug, Clone, Default)]
pub struct SourceLoad {
    pub records: Vec<UnifiedRecord>,
    /// Raw records read before normalization
    pub raw_count: usize,
    pub missing: bool,
}

impl SourceLoad {
    pub fn dropped(&self) -> usize {
        self.raw_count - self.records.len()
    }
}

/// Load one source and normalize every record in file order, keeping those
/// that resolve to coordinates.
#[instrument(skip(reader, path), fields(path = %path.display()))]
pub fn load_and_normalize(
    reader: &dyn RecordSource,
    path: &Path,
    category: Category,
) -> Result<SourceLoad> {
    let Some(raw_records) = reader.read_records(path)? else {
        warn!("Source {} not found, treating as empty", path.display());
        return Ok(SourceLoad {
            missing: true,
            ..SourceLoad::default()
        });
    };

    let records: Vec<UnifiedRecord> = raw_records
        .iter()
        .filter_map(|raw| normalize_record(raw, category))
        .collect();

    let load = SourceLoad {
        raw_count: raw_records.len(),
        records,
        missing: false,
    };
    debug!(
        "Normalized {} of {} raw {} records",
        load.records.len(),
        load.raw_count,
        category
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_source(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let load = load_and_normalize(&JsonFileSource, &path, Category::Storm).unwrap();
        assert!(load.missing);
        assert!(load.records.is_empty());
        assert_eq!(load.raw_count, 0);
    }

    #[test]
    fn test_load_keeps_order_and_drops_coordinate_less_records() {
        let file = write_source(
            &json!([
                {"latitude": 1.0, "longitude": 1.0, "name": "first"},
                {"name": "no coordinates"},
                {"lat": "2.0", "lon": "2.0", "name": "second"},
                {"latitude": "x", "longitude": 3.0, "name": "bad latitude"},
                {"latitude": 4.0, "longitude": 4.0, "name": "third"}
            ])
            .to_string(),
        );

        let load = load_and_normalize(&JsonFileSource, file.path(), Category::Earthquake).unwrap();
        let names: Vec<&str> = load.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(load.raw_count, 5);
        assert_eq!(load.dropped(), 2);
        assert!(!load.missing);
    }

    #[test]
    fn test_malformed_source_is_fatal() {
        let not_array = write_source(r#"{"records": []}"#);
        let err = load_and_normalize(&JsonFileSource, not_array.path(), Category::Shipwreck)
            .unwrap_err();
        assert!(matches!(err, MashupError::MalformedSource { .. }));

        let truncated = write_source(r#"[{"lat": 1.0, "lon": "#);
        let err = load_and_normalize(&JsonFileSource, truncated.path(), Category::Shipwreck)
            .unwrap_err();
        assert!(matches!(err, MashupError::MalformedSource { .. }));

        let scalar_items = write_source("[1, 2, 3]");
        let err = load_and_normalize(&JsonFileSource, scalar_items.path(), Category::Shipwreck)
            .unwrap_err();
        assert!(matches!(err, MashupError::MalformedSource { .. }));
    }

    #[test]
    fn test_directory_path_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_and_normalize(&JsonFileSource, dir.path(), Category::Storm).unwrap_err();
        assert!(matches!(err, MashupError::UnreadableSource { .. }));
    }

    #[test]
    fn test_in_memory_source() {
        let mut source = InMemorySource::new();
        let record = match json!({"lat": 10.0, "lon": 20.0}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        source.insert("mem/aviation.json", vec![record]);

        let load = load_and_normalize(&source, Path::new("mem/aviation.json"), Category::AviationAccident)
            .unwrap();
        assert_eq!(load.records.len(), 1);

        let missing = load_and_normalize(&source, Path::new("mem/other.json"), Category::AviationAccident)
            .unwrap();
        assert!(missing.missing);
    }
}
