//!
//! Domain types and services behind the stock monitor dashboard.
//!
//! This crate aggregates:
//! - `error` — unified error type `MonitorError` used across the workspace.
//! - `result` — handy `Result<T, MonitorError>` alias.
//! - `fields` — the fixed column table (`DisplayField`) and its wire codes.
//! - `symbols` — symbol normalization and symbol-file parsing.
//! - `ticker` — per-symbol quote state and directional coloring.
//! - `store` — the durable, unique set of tracked symbols.
//! - `quote` — batch request building, fetching, and response parsing.
//! - `market` — trading-hours rule and clock text.
//! - `logging` — the injectable `EventLog` handle.
//! - `net` — endpoint and timing defaults.
#![warn(missing_docs)]
pub mod error;
pub mod fields;
pub mod logging;
pub mod market;
pub mod net;
pub mod quote;
pub mod result;
pub mod store;
pub mod symbols;
pub mod ticker;

pub use error::MonitorError;
pub use logging::EventLog;
pub use result::Result;
pub use store::SymbolStore;
pub use ticker::Ticker;
