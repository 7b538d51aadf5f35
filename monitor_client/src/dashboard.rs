//! The live-monitoring loop.
//!
//! `Dashboard` owns the symbol store, the per-symbol quote state, and the screen. It moves
//! through `Initializing -> Running -> ShuttingDown -> Stopped`:
//!
//! - `start` loads the tracked symbols, computes the layout, draws the header, and spawns
//!   the clock thread.
//! - `run` repeats poll cycles: read at most one input event, fetch and apply quotes,
//!   redraw the body, sleep. Timeouts and transport failures are logged and the cycle
//!   ends without redrawing, which leaves the previous table on screen.
//! - `shutdown` always runs after the loop, even when it ended with an error: stop and
//!   join the clock, restore the terminal, close the store, in that order. A dashboard
//!   dropped without a finished shutdown, e.g. while unwinding from a panic, runs the same
//!   sequence from `Drop`.
//!
//! User input is handled on the loop thread only, so adds, removes, and redraws never
//! race with each other.

use std::collections::HashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use monitor_common::fields::FIELDS;
use monitor_common::quote::{QuoteRequest, QuoteSource, parse_quotes};
use monitor_common::symbols::normalize_symbol;
use monitor_common::{EventLog, MonitorError, Result, SymbolStore, Ticker};
use strum::Display;

use crate::clock::Clock;
use crate::layout::Layout;
use crate::screen::{InputEvent, Screen};

/// Prompt shown while a symbol is typed.
const PROMPT: &str = "Input ticker: ";

/// Lifecycle of a dashboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DashboardState {
    /// Loading symbols and preparing the screen.
    Initializing,
    /// Poll cycles are running.
    Running,
    /// Stopping the clock, restoring the terminal, closing the store.
    ShuttingDown,
    /// Everything has been released.
    Stopped,
}

/// Dashboard settings.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Base URL of the CSV quote endpoint.
    pub quote_url: String,
    /// Delay between poll cycles.
    pub poll_interval: Duration,
    /// Delay between clock redraws.
    pub clock_interval: Duration,
}

/// Live quote table bound to a screen, a quote source, and a symbol store.
pub struct Dashboard<S: Screen, Q: QuoteSource> {
    screen: S,
    source: Q,
    store: Option<SymbolStore>,
    tickers: HashMap<String, Ticker>,
    symbols: Vec<String>,
    request: Option<QuoteRequest>,
    layout: Layout,
    state: DashboardState,
    running: Arc<AtomicBool>,
    clock: Option<Clock>,
    config: MonitorConfig,
    log: EventLog,
}

impl<S: Screen, Q: QuoteSource> Dashboard<S, Q> {
    /// Loads the tracked symbols and starts the clock thread.
    ///
    /// `screen` must already be acquired. If anything fails here the screen is restored
    /// before the error is returned.
    pub fn start(
        mut screen: S,
        source: Q,
        store: SymbolStore,
        config: MonitorConfig,
        running: Arc<AtomicBool>,
        log: EventLog,
    ) -> Result<Self> {
        log.info(format_args!("Dashboard state: {}", DashboardState::Initializing));
        let (symbols, layout) = match Self::prepare(&mut screen, &store) {
            Ok(prepared) => prepared,
            Err(e) => {
                log.error(format_args!("Dashboard failed to initialize: {}", e));
                let _ = screen.restore();
                return Err(e);
            }
        };

        let tickers = symbols
            .iter()
            .map(|symbol| (symbol.clone(), Ticker::new(symbol)))
            .collect();
        let request = QuoteRequest::build(&config.quote_url, &symbols, &FIELDS);
        let clock = Clock::start(
            screen.clock_panel(),
            Arc::clone(&running),
            config.clock_interval,
            log.clone(),
        );
        log.info(format_args!(
            "Tracking {} symbols: {}",
            symbols.len(),
            symbols.join(", ")
        ));

        let dashboard = Self {
            screen,
            source,
            store: Some(store),
            tickers,
            symbols,
            request,
            layout,
            state: DashboardState::Running,
            running,
            clock: Some(clock),
            config,
            log,
        };
        dashboard
            .log
            .info(format_args!("Dashboard state: {}", dashboard.state));
        Ok(dashboard)
    }

    fn prepare(screen: &mut S, store: &SymbolStore) -> Result<(Vec<String>, Layout)> {
        let symbols = store.list_all()?;
        let (width, height) = screen.size()?;
        let layout = Layout::new(width, height);
        screen.draw_header(&layout)?;
        Ok((symbols, layout))
    }

    /// Runs poll cycles until quit, then shuts down.
    ///
    /// The shutdown sequence runs whatever ended the loop; the first error wins.
    pub fn run(mut self) -> Result<()> {
        let outcome = self.run_loop();
        if let Err(e) = &outcome {
            self.log.error(format_args!("Dashboard loop failed: {}", e));
        }
        let teardown = self.shutdown();
        outcome.and(teardown)
    }

    fn run_loop(&mut self) -> Result<()> {
        while self.step()? {
            thread::sleep(self.config.poll_interval);
        }
        Ok(())
    }

    /// One poll cycle. Returns `false` once the session should end.
    pub fn step(&mut self) -> Result<bool> {
        if !self.running.load(Ordering::SeqCst) {
            self.log.info(format_args!("Stop requested"));
            return Ok(false);
        }
        if let Some(event) = self.screen.poll_event()? {
            if !self.handle_event(event)? {
                return Ok(false);
            }
        }
        self.refresh()?;
        Ok(true)
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<bool> {
        self.log.debug(format_args!("Input event: {}", event));
        match event {
            InputEvent::Quit => {
                self.log.info(format_args!("Quit requested"));
                return Ok(false);
            }
            InputEvent::AddSymbol => {
                if let Some(symbol) = self.prompt_symbol()? {
                    self.add_symbol(symbol)?;
                }
            }
            InputEvent::RemoveSymbol => {
                if let Some(symbol) = self.prompt_symbol()? {
                    self.remove_symbol(&symbol)?;
                }
            }
            InputEvent::Resize(width, height) => self.resize(width, height)?,
        }
        Ok(true)
    }

    /// Reads one symbol from the prompt.
    ///
    /// Resize events that arrive while the prompt is open are not delivered as input, so
    /// the terminal size is checked again once the line is in.
    fn prompt_symbol(&mut self) -> Result<Option<String>> {
        let line = self.screen.read_line(PROMPT)?;
        let (width, height) = self.screen.size()?;
        if Layout::new(width, height) != self.layout {
            self.resize(width, height)?;
        }
        Ok(normalize_symbol(&line))
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.layout = Layout::new(width, height);
        self.log.info(format_args!("Terminal resized to {}x{}", width, height));
        self.screen.draw_header(&self.layout)
    }

    fn store(&self) -> Result<&SymbolStore> {
        self.store.as_ref().ok_or(MonitorError::StoreClosed)
    }

    fn add_symbol(&mut self, symbol: String) -> Result<()> {
        if self.store()?.add(&symbol)? {
            self.log.info(format_args!("Added {}", symbol));
            self.tickers.insert(symbol.clone(), Ticker::new(&symbol));
            self.rebuild_request()?;
        } else {
            self.log.info(format_args!("{} is already tracked", symbol));
        }
        Ok(())
    }

    fn remove_symbol(&mut self, symbol: &str) -> Result<()> {
        self.store()?.remove(symbol)?;
        if self.tickers.remove(symbol).is_some() {
            self.log.info(format_args!("Removed {}", symbol));
        }
        self.rebuild_request()
    }

    fn rebuild_request(&mut self) -> Result<()> {
        self.symbols = self.store()?.list_all()?;
        self.request = QuoteRequest::build(&self.config.quote_url, &self.symbols, &FIELDS);
        Ok(())
    }

    /// Fetches and applies quotes, then redraws. A failed fetch skips the redraw.
    fn refresh(&mut self) -> Result<()> {
        if let Some(request) = &self.request {
            match self.source.fetch(request) {
                Ok(body) => {
                    let summary = parse_quotes(&body, &mut self.tickers, &self.log);
                    self.log.debug(format_args!(
                        "Applied quotes: {} updated, {} dropped, {} malformed",
                        summary.updated, summary.dropped, summary.malformed
                    ));
                }
                Err(e) if e.is_recoverable() => {
                    self.log.warn(format_args!("{}", e));
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        let rows = self.layout.rows(&self.symbols, &self.tickers);
        self.screen.draw_body(&self.layout, &rows)
    }

    /// Stops the clock, restores the screen and closes the store. Runs at most once.
    fn shutdown(&mut self) -> Result<()> {
        if self.state == DashboardState::Stopped {
            return Ok(());
        }
        self.state = DashboardState::ShuttingDown;
        self.log.info(format_args!("Dashboard state: {}", self.state));
        self.running.store(false, Ordering::SeqCst);

        let clock = match self.clock.take() {
            Some(clock) => clock.stop(),
            None => Ok(()),
        };
        let screen = self.screen.restore();
        let store = match self.store.take() {
            Some(store) => store.close(),
            None => Ok(()),
        };

        self.state = DashboardState::Stopped;
        self.log.info(format_args!("Dashboard state: {}", self.state));
        self.log.flush();
        clock.and(screen).and(store)
    }
}

impl<S: Screen, Q: QuoteSource> Drop for Dashboard<S, Q> {
    fn drop(&mut self) {
        if self.state == DashboardState::Stopped {
            return;
        }
        self.log
            .error(format_args!("Dashboard dropped while {}, shutting down", self.state));
        if let Err(e) = self.shutdown() {
            self.log.error(format_args!("Shutdown failed: {}", e));
        }
    }
}
