use anyhow::Context;
use chrono::Utc;
use tracing::{error, info};

use disaster_mashup::config::Config;
use disaster_mashup::logging;
use disaster_mashup::pipeline::{aggregate, JsonFileSource};
use disaster_mashup::report::{FsReportSink, Metadata, ReportSink, RunSummary};

fn run() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    info!(
        "Merging {} sources into {}",
        config.sources.len(),
        config.output.dir.display()
    );

    // Nothing is written unless every source loads
    let result = aggregate(&JsonFileSource, &config).context("failed to aggregate sources")?;

    let metadata = Metadata::from_result(&result, &config, Utc::now());
    let sink = FsReportSink::new(config.output.clone());
    let outcome = sink
        .write(&result.records, &metadata)
        .context("failed to write output artifacts")?;

    print!("{}", RunSummary::new(&result, &outcome));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();

    if let Err(e) = run() {
        error!("Mashup run failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
