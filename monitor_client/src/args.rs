//! Command-line arguments for the stock monitor.
//!
//! This module defines the CLI interface using `clap`. Every option has a default, so the
//! dashboard starts with no arguments at all. See `main` for end-to-end usage.
use clap::Parser;
use monitor_common::net::{
    CLOCK_INTERVAL_MS, DEFAULT_DB_PATH, DEFAULT_LOG_PATH, DEFAULT_QUOTE_URL, POLL_INTERVAL_MS,
    REQUEST_TIMEOUT_SECS,
};
use std::path::PathBuf;
use std::time::Duration;

use crate::dashboard::MonitorConfig;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// SQLite database holding the tracked symbols. Created if absent.
    #[clap(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// File that warnings and errors are appended to. Created if absent.
    #[clap(long, default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,

    /// CSV quote endpoint queried with the symbol list and field codes.
    #[clap(long, default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Seconds before a quote request is abandoned.
    #[clap(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Milliseconds between poll cycles.
    #[clap(long, default_value_t = POLL_INTERVAL_MS)]
    pub poll_ms: u64,

    /// Milliseconds between clock redraws.
    #[clap(long, default_value_t = CLOCK_INTERVAL_MS)]
    pub clock_ms: u64,

    /// Text file with symbols to add before starting.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub import: Option<PathBuf>,
}

impl Args {
    /// Upper bound for one quote request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Dashboard settings derived from the arguments.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            quote_url: self.quote_url.clone(),
            poll_interval: Duration::from_millis(self.poll_ms),
            clock_interval: Duration::from_millis(self.clock_ms),
        }
    }
}
