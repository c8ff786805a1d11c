pub mod aggregate;
pub mod loader;
pub mod normalize;

pub use aggregate::{aggregate, AggregateResult, SourceSummary};
pub use loader::{load_and_normalize, InMemorySource, JsonFileSource, RecordSource, SourceLoad};
pub use normalize::normalize_record;
