//! Batch quote requests: building, fetching, and parsing.
//!
//! A `QuoteRequest` encodes every tracked symbol and the fixed field codes into a single
//! GET URL. A `QuoteSource` executes it; `HttpQuoteSource` does so over HTTP with a hard
//! timeout. `parse_quotes` routes the delimited response back into per-symbol
//! [`Ticker`] state.
//!
//! Failure model:
//! - Timeouts and connection failures surface as `MonitorError::Timeout` and
//!   `MonitorError::Transport`; the caller decides whether to skip the cycle.
//! - A record naming an untracked symbol is dropped quietly. This happens whenever a
//!   symbol is removed while a response for it is still on its way.
//! - A record with the wrong number of fields is skipped with a warning; the rest of the
//!   response is still applied.

use std::collections::HashMap;
use std::time::Duration;

use csv::ReaderBuilder;

use crate::error::MonitorError;
use crate::fields::DisplayField;
use crate::logging::EventLog;
use crate::net::SYMBOL_SEPARATOR;
use crate::result::Result;
use crate::ticker::Ticker;

/// A ready-to-send batch request for a non-empty list of symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    symbols: Vec<String>,
    url: String,
}

impl QuoteRequest {
    /// Builds the request URL for `symbols` and `fields`.
    ///
    /// Returns `None` for an empty symbol list: there is nothing to ask for, and the
    /// caller skips fetching for that cycle.
    pub fn build(base_url: &str, symbols: &[String], fields: &[DisplayField]) -> Option<Self> {
        if symbols.is_empty() {
            return None;
        }
        let joined = symbols
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join(SYMBOL_SEPARATOR);
        let codes: String = fields.iter().map(|f| f.code).collect();
        let url = format!("{}?s={}&f={}", base_url, joined, urlencoding::encode(&codes));
        Some(Self {
            symbols: symbols.to_vec(),
            url,
        })
    }

    /// Symbols in request order; this is also the display order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Full GET URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Anything able to answer a [`QuoteRequest`] with a raw delimited body.
pub trait QuoteSource {
    /// Performs the request and returns the response body.
    fn fetch(&self, request: &QuoteRequest) -> Result<String>;
}

/// Blocking HTTP quote source.
///
/// The timeout covers the whole exchange; when it fires the in-flight request is dropped
/// and nothing from it ever reaches the ticker state.
pub struct HttpQuoteSource {
    client: reqwest::blocking::Client,
}

impl HttpQuoteSource {
    /// Creates a source whose requests fail with `Timeout` after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&self, request: &QuoteRequest) -> Result<String> {
        let response = self.client.get(request.url()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::Transport(format!(
                "quote source answered {}",
                status
            )));
        }
        Ok(response.text()?)
    }
}

/// Outcome counts of one [`parse_quotes`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    /// Records applied to a tracked ticker.
    pub updated: usize,
    /// Records naming a symbol that is no longer tracked.
    pub dropped: usize,
    /// Records skipped because of a field count mismatch or unreadable content.
    pub malformed: usize,
}

/// Applies a comma-delimited response to `tickers`.
///
/// Each record is `symbol,value,...` in column order. Values may be quoted.
pub fn parse_quotes(
    raw: &str,
    tickers: &mut HashMap<String, Ticker>,
    log: &EventLog,
) -> ParseSummary {
    let mut summary = ParseSummary::default();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                log.warn(format_args!("Unreadable quote record: {}", e));
                summary.malformed += 1;
                continue;
            }
        };
        let Some(symbol) = record.get(0) else {
            continue;
        };
        let Some(ticker) = tickers.get_mut(symbol) else {
            log.debug(format_args!("Dropping record for untracked symbol {}", symbol));
            summary.dropped += 1;
            continue;
        };
        let values: Vec<&str> = record.iter().skip(1).collect();
        match ticker.update(values.as_slice()) {
            Ok(()) => summary.updated += 1,
            Err(e) => {
                log.warn(format_args!("{}", e));
                summary.malformed += 1;
            }
        }
    }
    summary
}
