//! Quote source endpoint and dashboard timing defaults.

/// CSV quote endpoint queried with `s=<symbols>&f=<field codes>`.
pub const DEFAULT_QUOTE_URL: &str = "http://finance.yahoo.com/d/quotes.csv";
/// Upper bound for a single quote request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;
/// Delay between poll cycles of the main loop, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 250;
/// Redraw cadence of the clock panel, in milliseconds.
pub const CLOCK_INTERVAL_MS: u64 = 100;
/// Default location of the symbol database.
pub const DEFAULT_DB_PATH: &str = "db/monitor.db";
/// Default location of the log file.
pub const DEFAULT_LOG_PATH: &str = "log/monitor.log";

/// Separator between symbols in the `s` query parameter.
pub const SYMBOL_SEPARATOR: &str = "+";
