//! Stock Monitor — a terminal dashboard that keeps a small, editable set of market
//! symbols on screen, refreshes their quotes from a CSV quote endpoint a few times per
//! second, and remembers the set between sessions in a SQLite file.
//!
//! Usage example (CLI):
//! ```bash
//! stock_monitor --db-path db/monitor.db --log-path log/monitor.log --import ./tickers.txt
//! ```
//!
//! Keys: `q` quits, `+` prompts for a symbol to add, `-` prompts for one to remove.
//!
//! Startup order: logger, symbol store (plus optional import), quote source, terminal.
//! A store or terminal failure aborts with a message on stderr and a non-zero exit code;
//! the terminal is restored first if it was already switched.
#![warn(missing_docs)]
mod args;
mod clock;
mod dashboard;
mod layout;
mod screen;
mod terminal;

use crate::args::Args;
use crate::dashboard::Dashboard;
use crate::terminal::TerminalScreen;
use clap::Parser;
use env_logger::{Target, WriteStyle};
use monitor_common::quote::HttpQuoteSource;
use monitor_common::symbols::{SymbolFile, SymbolParser};
use monitor_common::{EventLog, MonitorError, Result, SymbolStore};
use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stock_monitor: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let log = init_logger(&args.log_path)?;
    log.info(format_args!("Opening symbol store {}", args.db_path.display()));

    let store = SymbolStore::open(&args.db_path).inspect_err(|e| {
        log.error(format_args!(
            "Failed to open symbol store {}: {}",
            args.db_path.display(),
            e
        ))
    })?;
    if let Some(path) = &args.import {
        import_symbols(&store, path, &log)?;
    }

    let source = HttpQuoteSource::new(args.timeout())?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        let log = log.clone();
        ctrlc::set_handler(move || {
            log.info(format_args!("Termination signal received. Shutting down..."));
            running.store(false, Ordering::SeqCst);
        })
        .map_err(|e| MonitorError::Terminal(format!("Error setting signal handler: {}", e)))?;
    }

    let screen = match TerminalScreen::acquire() {
        Ok(screen) => screen,
        Err(e) => {
            terminal::restore_terminal();
            log.error(format_args!("Failed to acquire terminal: {}", e));
            return Err(e);
        }
    };

    let dashboard = Dashboard::start(
        screen,
        source,
        store,
        args.monitor_config(),
        running,
        log.clone(),
    )?;
    let result = dashboard.run();
    log.flush();
    result
}

/// Builds the file-backed logger handed to every component.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
fn init_logger(path: &Path) -> Result<EventLog> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let logger = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .build();
    Ok(EventLog::new(logger))
}

/// Adds every symbol listed in `path` to the store. Already tracked symbols are skipped.
fn import_symbols(store: &SymbolStore, path: &Path, log: &EventLog) -> Result<()> {
    let file = File::open(path)
        .map_err(|e| MonitorError::ParseTickersFile(format!("{}: {}", path.display(), e)))?;
    let symbols = SymbolFile::parse_from_file(BufReader::new(file))?;

    let mut added = 0;
    for symbol in &symbols {
        if store.add(symbol)? {
            added += 1;
        }
    }
    log.info(format_args!(
        "Imported {} of {} symbols from {}",
        added,
        symbols.len(),
        path.display()
    ));
    Ok(())
}
