use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env::VarError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{MashupError, Result};
use crate::types::Category;

/// Run configuration: where each source lives and where output goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relative source paths are resolved against this directory
    pub base_dir: PathBuf,
    pub dataset: DatasetInfo,
    pub output: OutputConfig,
    /// Sources in merge order
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetInfo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub records_file: String,
    pub metadata_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub key: String,
    pub category: Category,
    pub path: PathBuf,
    pub attribution: SourceAttribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAttribution {
    pub source: String,
    pub url: String,
    pub license: String,
}

impl Default for DatasetInfo {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_TITLE.to_string(),
            description: constants::DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            records_file: constants::DEFAULT_RECORDS_FILE.to_string(),
            metadata_file: constants::DEFAULT_METADATA_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn records_path(&self) -> PathBuf {
        self.dir.join(&self.records_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.metadata_file)
    }
}

impl SourceConfig {
    pub fn new(
        key: &str,
        category: Category,
        path: impl Into<PathBuf>,
        attribution: SourceAttribution,
    ) -> Self {
        Self {
            key: key.to_string(),
            category,
            path: path.into(),
            attribution,
        }
    }
}

impl SourceAttribution {
    fn public_domain(source: &str, url: &str) -> Self {
        Self {
            source: source.to_string(),
            url: url.to_string(),
            license: constants::PUBLIC_DOMAIN_LICENSE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            dataset: DatasetInfo::default(),
            output: OutputConfig::default(),
            sources: default_sources(),
        }
    }
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(
            constants::AVIATION_ACCIDENTS_SOURCE,
            Category::AviationAccident,
            "strange-places-mysterious-phenomena/individual/aviation_accidents.json",
            SourceAttribution::public_domain(
                "NTSB Aviation Accident Database",
                "https://www.ntsb.gov/safety/data",
            ),
        ),
        SourceConfig::new(
            constants::SHIPWRECKS_SOURCE,
            Category::Shipwreck,
            "strange-places-mysterious-phenomena/individual_complete/noaa_shipwrecks.json",
            SourceAttribution::public_domain(
                "NOAA AWOIS Database",
                "https://www.nauticalcharts.noaa.gov/data/wrecks-and-obstructions.html",
            ),
        ),
        SourceConfig::new(
            constants::STORMS_SOURCE,
            Category::Storm,
            "standalone-datasets/noaa-significant-storms/noaa_significant_storms.json",
            SourceAttribution::public_domain(
                "NOAA Storm Events Database",
                "https://www.ncdc.noaa.gov/stormevents/",
            ),
        ),
        SourceConfig::new(
            constants::EARTHQUAKES_SOURCE,
            Category::Earthquake,
            "standalone-datasets/usgs-significant-earthquakes/usgs_significant_earthquakes.json",
            SourceAttribution::public_domain(
                "USGS Earthquake Hazards Program",
                "https://earthquake.usgs.gov/",
            ),
        ),
    ]
}

impl Config {
    /// Load the run configuration.
    ///
    /// Uses the file named by `MASHUP_CONFIG` if set, otherwise `mashup.toml`
    /// in the working directory if present, otherwise the built-in defaults.
    pub fn load() -> Result<Self> {
        let config = match std::env::var(constants::CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(VarError::NotPresent) => {
                let local = Path::new(constants::DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::from_file(local)?
                } else {
                    debug!("No config file found, using built-in defaults");
                    Self::default()
                }
            }
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MashupError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(MashupError::Config("no sources configured".to_string()));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.key.trim().is_empty() {
                return Err(MashupError::Config("source key must not be empty".to_string()));
            }
            if !seen.insert(source.key.as_str()) {
                return Err(MashupError::Config(format!(
                    "duplicate source key '{}'",
                    source.key
                )));
            }
        }

        if self.output.records_file == self.output.metadata_file {
            return Err(MashupError::Config(
                "records and metadata files must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Location of a source on disk
    pub fn source_path(&self, source: &SourceConfig) -> PathBuf {
        self.base_dir.join(&source.path)
    }
}
