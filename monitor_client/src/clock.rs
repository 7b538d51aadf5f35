//! Background clock thread.
//!
//! The clock redraws only its own panel, on its own cadence, until the shared keep-running
//! flag is cleared. `Clock::stop` clears the flag and joins the thread, so once it returns
//! the clock can no longer touch the terminal.
use chrono::Local;
use monitor_common::market::clock_line;
use monitor_common::{EventLog, MonitorError, Result};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::screen::ClockPanel;

/// Handle of the running clock thread.
pub struct Clock {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Clock {
    /// Spawns the thread drawing the current time into `panel` every `interval`.
    pub fn start(
        mut panel: Box<dyn ClockPanel>,
        running: Arc<AtomicBool>,
        interval: Duration,
        log: EventLog,
    ) -> Self {
        log.info(format_args!("Clock thread started, interval {:?}", interval));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                if let Err(e) = panel.draw(&clock_line(&Local::now())) {
                    log.warn(format_args!("Clock redraw failed: {}", e));
                }
                thread::sleep(interval);
            }
            log.info(format_args!("Clock thread stopping..."));
        });
        Self { running, handle }
    }

    /// Clears the keep-running flag and waits for the thread to exit.
    pub fn stop(self) -> Result<()> {
        self.running.store(false, Ordering::SeqCst);
        self.handle
            .join()
            .map_err(|_| MonitorError::ClockThread("clock thread panicked".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    struct CountingPanel {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl ClockPanel for CountingPanel {
        fn draw(&mut self, text: &str) -> Result<()> {
            self.lines.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn draws_until_stopped_and_not_after() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let running = Arc::new(AtomicBool::new(true));
        let clock = Clock::start(
            Box::new(CountingPanel { lines: Arc::clone(&lines) }),
            Arc::clone(&running),
            Duration::from_millis(10),
            EventLog::disabled(),
        );

        thread::sleep(Duration::from_millis(50));
        let started = Instant::now();
        clock.stop().unwrap();
        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(!running.load(Ordering::SeqCst));

        let drawn = lines.lock().unwrap().len();
        assert!(drawn >= 1);
        assert!(lines.lock().unwrap()[0].starts_with("Time: "));
        thread::sleep(Duration::from_millis(30));
        assert_eq!(lines.lock().unwrap().len(), drawn);
    }

    #[test]
    fn cleared_flag_stops_the_thread_on_its_own() {
        let running = Arc::new(AtomicBool::new(false));
        let lines = Arc::new(Mutex::new(Vec::new()));
        let clock = Clock::start(
            Box::new(CountingPanel { lines: Arc::clone(&lines) }),
            running,
            Duration::from_millis(10),
            EventLog::disabled(),
        );
        clock.stop().unwrap();
        assert!(lines.lock().unwrap().is_empty());
    }
}
