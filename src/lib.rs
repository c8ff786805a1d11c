pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::Config;
pub use error::{MashupError, Result};
pub use pipeline::{aggregate, AggregateResult};
pub use types::{Category, RawRecord, UnifiedRecord};
