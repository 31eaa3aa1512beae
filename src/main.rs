//! presto-metrico - Presto coordinator metrics for DogStatsD
//!
//! Polls the coordinator's JMX endpoints on a timer and forwards
//! whitelisted numeric attributes as gauges.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use presto_metrico::cli::Cli;
use presto_metrico::collector::Collector;
use presto_metrico::config::Config;
use presto_metrico::error::{AppError, AppResult};
use presto_metrico::metrics::CollectorStats;
use presto_metrico::runner;
use presto_metrico::statsd::StatsdClient;

/// Resolve configuration: file, then CLI/env overrides, then validation
fn load_config(cli: &Cli) -> AppResult<Config> {
    let mut config = Config::load_or_default(cli.config.as_ref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    presto_metrico::init_logging(&cli.log_level.to_string())?;

    let config = load_config(&cli)?;

    if cli.validate {
        println!("Configuration is valid");
        return Ok(());
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        coordinator = %config.coordinator.url,
        statsd = %config.statsd.address,
        "Starting presto-metrico"
    );

    let statsd = StatsdClient::connect(&config.statsd.address).map_err(AppError::Statsd)?;
    let collector = Collector::presto(&config.coordinator.url, config.coordinator.timeout_ms)
        .map_err(AppError::from)?;
    let stats = CollectorStats::new();

    if cli.once {
        let report = collector.run_pass(&statsd).await;
        stats.record(&report);
        return Ok(());
    }

    runner::run(
        &collector,
        &statsd,
        Duration::from_secs(config.collection.interval_secs),
        &stats,
        runner::shutdown_signal(),
    )
    .await;

    Ok(())
}
