//! Internal bookkeeping for collection passes
//!
//! Each pass produces a [`PassReport`]. Reports are folded into
//! process-lifetime [`CollectorStats`] so the scheduler can log totals.
//! Nothing here is forwarded to statsd.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Thread-safe counter using atomic operations
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Create a new counter initialized to 0
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Increment the counter by 1
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the counter by a specific amount
    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Get the current value
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Outcome of one collection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    /// Beans attempted
    pub beans: usize,
    /// Beans whose URI, fetch or decode failed
    pub beans_failed: usize,
    /// Gauges handed to the transport
    pub gauges_emitted: usize,
    /// Whitelisted attributes dropped because their value was not numeric
    pub attributes_skipped: usize,
    /// Attributes not on the whitelist
    pub attributes_ignored: usize,
    /// Wall time of the pass
    pub duration: Duration,
}

impl PassReport {
    /// Beans that contributed metrics
    pub fn beans_succeeded(&self) -> usize {
        self.beans - self.beans_failed
    }
}

/// Totals across every pass since startup
#[derive(Debug, Default)]
pub struct CollectorStats {
    pub passes: Counter,
    pub bean_failures: Counter,
    pub gauges_emitted: Counter,
    pub attributes_skipped: Counter,
}

impl CollectorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a pass report into the totals
    pub fn record(&self, report: &PassReport) {
        self.passes.inc();
        self.bean_failures.inc_by(report.beans_failed as u64);
        self.gauges_emitted.inc_by(report.gauges_emitted as u64);
        self.attributes_skipped
            .inc_by(report.attributes_skipped as u64);
    }
}
