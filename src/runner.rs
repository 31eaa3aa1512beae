//! Periodic collection loop
//!
//! Runs one collection pass per interval tick until a shutdown signal
//! arrives. Passes never overlap: a slow pass delays the next tick and
//! missed ticks are skipped rather than replayed.

use std::future::Future;
use std::time::Duration;

use tokio::signal;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::collector::Collector;
use crate::metrics::CollectorStats;
use crate::statsd::GaugeSink;

/// Run collection passes every `interval` until `shutdown` resolves
///
/// The first pass starts one full interval after startup.
pub async fn run<F>(
    collector: &Collector,
    sink: &dyn GaugeSink,
    interval: Duration,
    stats: &CollectorStats,
    shutdown: F,
) where
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!(interval_secs = interval.as_secs(), "Collection loop started");

    loop {
        tokio::select! {
            _ = &mut shutdown => break,

            _ = ticker.tick() => {
                info!("Sending metrics");
                let report = collector.run_pass(sink).await;
                stats.record(&report);
            }
        }
    }

    info!(
        passes = stats.passes.get(),
        gauges = stats.gauges_emitted.get(),
        bean_failures = stats.bean_failures.get(),
        "Collection loop stopped"
    );
}

/// Wait for shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
