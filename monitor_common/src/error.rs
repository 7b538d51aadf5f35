//! Error types shared between the domain library and the dashboard.
//!
//! The `MonitorError` enum unifies storage, network, parsing, and terminal failures so
//! every layer can propagate a single error type. Network and per-record parse failures
//! are recoverable: the dashboard logs them and keeps polling. Everything else ends the
//! session.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the dashboard.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// I/O error originating from the standard library, files, or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure reported by the embedded symbol database.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The quote request did not complete within the configured timeout.
    #[error("Quote request timed out: {0}")]
    Timeout(String),

    /// Connection, protocol, or HTTP status failure while fetching quotes.
    #[error("Quote transport error: {0}")]
    Transport(String),

    /// A response record did not carry the expected number of fields.
    #[error("Malformed record for {symbol}: expected {expected} fields, found {found}")]
    MalformedResponse {
        /// Symbol named by the first column of the record.
        symbol: String,
        /// Number of fields a complete record carries.
        expected: usize,
        /// Number of fields actually present.
        found: usize,
    },

    /// The terminal could not be acquired, drawn to, or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Error while parsing a symbols file into symbol values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// The clock thread panicked before it could be joined.
    #[error("Clock thread error: {0}")]
    ClockThread(String),

    /// The symbol store was used after the session closed it.
    #[error("Symbol store is closed")]
    StoreClosed,
}

impl MonitorError {
    /// Returns `true` for failures the poll loop logs and skips instead of aborting on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MonitorError::Timeout(_)
                | MonitorError::Transport(_)
                | MonitorError::MalformedResponse { .. }
        )
    }
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MonitorError::Timeout(err.to_string())
        } else {
            MonitorError::Transport(err.to_string())
        }
    }
}
