//! CLI argument parsing for presto-metrico
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Options
//!
//! - `--coordinator` / `-c`: Presto coordinator address (env: PRESTO_COORDINATOR)
//! - `--dogstatsd` / `-d`: DogStatsD address (env: PRESTO_METRICO_DOGSTATSD)
//! - `--timer` / `-t`: Seconds between collection passes (env: PRESTO_METRICO_INTERVAL)
//! - `--timeout-ms`: Per-bean HTTP timeout in milliseconds (env: PRESTO_METRICO_TIMEOUT)
//! - `--config`: Optional YAML configuration file (env: PRESTO_METRICO_CONFIG)
//! - `--validate`: Validate configuration without starting the collection loop
//! - `--once`: Run a single collection pass and exit
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: PRESTO_METRICO_LOG_LEVEL)
//!
//! # Precedence
//!
//! Configuration values are resolved in the following order (highest to lowest priority):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

/// presto-metrico - Collect Presto coordinator metrics and send them to DogStatsD
///
/// Polls the coordinator's JMX endpoints on a fixed interval and forwards
/// whitelisted numeric attributes as gauges.
#[derive(Parser, Debug)]
#[command(name = "presto-metrico")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Address of the Presto coordinator (e.g. http://presto:8080)
    #[arg(short, long, value_name = "URL", env = "PRESTO_COORDINATOR")]
    pub coordinator: Option<String>,

    /// Address of the DogStatsD server [default: 127.0.0.1:8125]
    #[arg(short, long, value_name = "ADDR", env = "PRESTO_METRICO_DOGSTATSD")]
    pub dogstatsd: Option<String>,

    /// Seconds between collection passes [default: 15]
    #[arg(short, long, value_name = "SECS", env = "PRESTO_METRICO_INTERVAL")]
    pub timer: Option<u64>,

    /// Per-bean HTTP timeout in milliseconds [default: 5000]
    #[arg(long, value_name = "MS", env = "PRESTO_METRICO_TIMEOUT")]
    pub timeout_ms: Option<u64>,

    /// Path to an optional YAML configuration file
    #[arg(long, value_name = "FILE", env = "PRESTO_METRICO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Validate configuration without starting the collection loop
    #[arg(long)]
    pub validate: bool,

    /// Run a single collection pass and exit
    #[arg(long)]
    pub once: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "PRESTO_METRICO_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

impl Cli {
    /// Overlay command-line values onto a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref coordinator) = self.coordinator {
            config.coordinator.url = coordinator.clone();
        }
        if let Some(ref dogstatsd) = self.dogstatsd {
            config.statsd.address = dogstatsd.clone();
        }
        if let Some(timer) = self.timer {
            config.collection.interval_secs = timer;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.coordinator.timeout_ms = timeout_ms;
        }
    }
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level - default
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
