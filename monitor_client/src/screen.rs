//! Drawing and input seams of the dashboard.
//!
//! The dashboard talks to the terminal only through `Screen`, and the clock thread only
//! through its own `ClockPanel`. Each panel is a separate screen region, so the two
//! threads never draw over each other.

use monitor_common::Result;
use strum::Display;

use crate::layout::{Cell, Layout};

/// Input the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InputEvent {
    /// `q` or Ctrl+C.
    Quit,
    /// `+`: prompt for a symbol to track.
    AddSymbol,
    /// `-`: prompt for a symbol to drop.
    RemoveSymbol,
    /// The terminal now has the given width and height.
    Resize(u16, u16),
}

/// The clock region, owned by the clock thread.
pub trait ClockPanel: Send {
    /// Clears the panel and writes `text`.
    fn draw(&mut self, text: &str) -> Result<()>;
}

/// The header and body regions plus keyboard input.
pub trait Screen {
    /// Current terminal width and height.
    fn size(&self) -> Result<(u16, u16)>;

    /// Returns the next pending input event without waiting.
    fn poll_event(&mut self) -> Result<Option<InputEvent>>;

    /// Shows `prompt` in the body panel and blocks until a line is entered.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Redraws the header panel.
    fn draw_header(&mut self, layout: &Layout) -> Result<()>;

    /// Redraws the body panel with one line per row.
    fn draw_body(&mut self, layout: &Layout, rows: &[Vec<Cell>]) -> Result<()>;

    /// Handle for drawing the clock panel from another thread.
    fn clock_panel(&self) -> Box<dyn ClockPanel>;

    /// Returns the terminal to the mode it was in before the dashboard started.
    fn restore(&mut self) -> Result<()>;
}
