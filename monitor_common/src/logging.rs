//! Injectable logging handle.
//!
//! Components never reach for a process-global logger. They receive an `EventLog`, a
//! cheap cloneable handle over any `log::Log` backend, and write records through it. The
//! dashboard binary builds an `env_logger` backend pointed at a file; tests use
//! `CaptureLog`, available with the `test-support` feature, to count what was written.

use std::fmt;
use std::sync::Arc;
#[cfg(any(test, feature = "test-support"))]
use std::sync::Mutex;

use log::{Level, Log, Metadata, Record};

/// Target attached to every record written through an `EventLog`.
const TARGET: &str = "stock_monitor";

/// Cloneable logger handle passed into components at construction.
#[derive(Clone)]
pub struct EventLog {
    inner: Arc<dyn Log>,
}

impl EventLog {
    /// Wraps a logging backend.
    pub fn new<L: Log + 'static>(logger: L) -> Self {
        Self {
            inner: Arc::new(logger),
        }
    }

    /// A handle that discards everything.
    pub fn disabled() -> Self {
        Self::new(Discard)
    }

    fn write(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.inner.enabled(&metadata) {
            return;
        }
        self.inner.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }

    /// Logs at `error` level.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Error, args);
    }

    /// Logs at `warn` level.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Warn, args);
    }

    /// Logs at `info` level.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Info, args);
    }

    /// Logs at `debug` level.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.write(Level::Debug, args);
    }

    /// Flushes buffered records of the backend.
    pub fn flush(&self) {
        self.inner.flush();
    }
}

struct Discard;

impl Log for Discard {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        false
    }

    fn log(&self, _record: &Record) {}

    fn flush(&self) {}
}

/// In-memory backend keeping every record as `(level, message)`.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct CaptureLog {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl CaptureLog {
    /// Creates a capture backend together with an `EventLog` writing into it.
    pub fn new() -> (Self, EventLog) {
        let capture = Self::default();
        let log = EventLog::new(capture.clone());
        (capture, log)
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of `warn` records.
    pub fn warnings(&self) -> usize {
        self.records()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .count()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Log for CaptureLog {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_reach_the_injected_backend() {
        let (capture, log) = CaptureLog::new();
        log.info(format_args!("started with {} symbols", 2));
        log.warn(format_args!("timeout"));

        assert_eq!(
            capture.records(),
            vec![
                (Level::Info, "started with 2 symbols".to_string()),
                (Level::Warn, "timeout".to_string()),
            ]
        );
        assert_eq!(capture.warnings(), 1);
    }

    #[test]
    fn disabled_log_accepts_records() {
        let log = EventLog::disabled();
        log.error(format_args!("ignored"));
        log.flush();
    }
}
