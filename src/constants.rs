/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MASHUP_CONFIG";
/// Config file picked up from the working directory when no override is set
pub const DEFAULT_CONFIG_FILE: &str = "mashup.toml";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_RECORDS_FILE: &str = "disasters_mashup.json";
pub const DEFAULT_METADATA_FILE: &str = "metadata.json";

pub const DEFAULT_TITLE: &str = "US Disasters Mashup";
pub const DEFAULT_DESCRIPTION: &str =
    "Unified dataset of aviation accidents, shipwrecks, severe storms, and earthquakes";

pub const PUBLIC_DOMAIN_LICENSE: &str = "Public Domain (US Government)";

// Source keys, in merge order
pub const AVIATION_ACCIDENTS_SOURCE: &str = "aviation_accidents";
pub const SHIPWRECKS_SOURCE: &str = "shipwrecks";
pub const STORMS_SOURCE: &str = "storms";
pub const EARTHQUAKES_SOURCE: &str = "earthquakes";
