//! Crossterm implementation of the dashboard screen.
//!
//! The terminal runs in raw mode on the alternate screen with the cursor hidden. Both
//! the dashboard and the clock thread write through the process-wide stdout lock and
//! hold it for a whole panel redraw, so partial panels never interleave. Restoring the
//! terminal happens under the same lock and marks the screen as released; the clock panel
//! checks that mark before drawing, so nothing is written after teardown, not even when
//! the panic hook restores the terminal before the clock thread has been joined.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, RestorePosition, SavePosition, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use monitor_common::Result;
use monitor_common::ticker::Direction;

use crate::layout::{CLOCK_ROWS, Cell, HEADER_ROWS, Layout};
use crate::screen::{ClockPanel, InputEvent, Screen};

/// Set once the terminal has been handed back.
static RELEASED: AtomicBool = AtomicBool::new(false);

/// The real terminal.
pub struct TerminalScreen {
    restored: bool,
}

impl TerminalScreen {
    /// Switches the terminal to raw mode and the alternate screen.
    ///
    /// On failure the caller should still call [`restore_terminal`].
    pub fn acquire() -> Result<Self> {
        RELEASED.store(false, Ordering::SeqCst);
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        install_panic_hook();
        Ok(Self { restored: false })
    }
}

/// Best-effort return to cooked mode and the main screen.
pub fn restore_terminal() {
    let _ = release();
}

/// Leaves raw mode and the alternate screen, attempting both steps even when the first
/// fails. Returns the first error.
fn release() -> io::Result<()> {
    let mut out = io::stdout().lock();
    release_to(&mut out, disable_raw_mode)
}

fn release_to<W: Write>(
    out: &mut W,
    leave_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    RELEASED.store(true, Ordering::SeqCst);
    let raw = leave_raw_mode();
    let screen = execute!(out, ResetColor, Show, LeaveAlternateScreen);
    raw.and(screen)
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

fn color_of(direction: Direction) -> Color {
    match direction {
        Direction::Up => Color::Green,
        Direction::Down => Color::Red,
        Direction::Neutral => Color::White,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if is_interrupt(&key) {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Char('q') => Some(InputEvent::Quit),
        KeyCode::Char('+') => Some(InputEvent::AddSymbol),
        KeyCode::Char('-') => Some(InputEvent::RemoveSymbol),
        _ => None,
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let input = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
            Event::Resize(width, height) => Some(InputEvent::Resize(width, height)),
            _ => None,
        };
        Ok(input)
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let row = CLOCK_ROWS + HEADER_ROWS;
        let mut line = String::new();

        loop {
            {
                let mut out = io::stdout().lock();
                queue!(
                    out,
                    MoveTo(0, row),
                    Clear(ClearType::FromCursorDown),
                    Print(prompt),
                    Print(&line),
                    Show
                )?;
                out.flush()?;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && edit_line(&mut line, key) {
                    break;
                }
            }
        }

        execute!(io::stdout(), Hide)?;
        Ok(line)
    }

    fn draw_header(&mut self, layout: &Layout) -> Result<()> {
        let top = layout.header_top();
        let mut out = io::stdout().lock();
        queue!(
            out,
            MoveTo(0, top),
            Clear(ClearType::CurrentLine),
            Print(layout.header_line()),
            MoveTo(0, top + 1),
            Clear(ClearType::CurrentLine),
            Print(layout.rule_line()),
        )?;
        out.flush()?;
        Ok(())
    }

    fn draw_body(&mut self, layout: &Layout, rows: &[Vec<Cell>]) -> Result<()> {
        let top = layout.body_top();
        let mut out = io::stdout().lock();
        queue!(out, MoveTo(0, top), Clear(ClearType::FromCursorDown))?;
        for (offset, row) in rows.iter().enumerate() {
            queue!(out, MoveTo(0, top + offset as u16))?;
            for (text, direction) in row {
                queue!(out, SetForegroundColor(color_of(*direction)), Print(text))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }

    fn clock_panel(&self) -> Box<dyn ClockPanel> {
        Box::new(TerminalClock)
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        release()?;
        Ok(())
    }
}

/// Applies one key press to the prompt line. Returns `true` once the prompt is done;
/// a cancelled prompt leaves the line empty.
fn edit_line(line: &mut String, key: KeyEvent) -> bool {
    if is_interrupt(&key) {
        line.clear();
        return true;
    }
    match key.code {
        KeyCode::Enter => true,
        KeyCode::Esc => {
            line.clear();
            true
        }
        KeyCode::Backspace => {
            line.pop();
            false
        }
        KeyCode::Char(c) => {
            line.push(c);
            false
        }
        _ => false,
    }
}

/// Clock panel on the top row of the real terminal.
struct TerminalClock;

impl ClockPanel for TerminalClock {
    fn draw(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if RELEASED.load(Ordering::SeqCst) {
            return Ok(());
        }
        queue!(
            out,
            SavePosition,
            MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            Print(text),
            RestorePosition
        )?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keys_map_to_dashboard_commands() {
        assert_eq!(map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('+'), KeyModifiers::SHIFT)),
            Some(InputEvent::AddSymbol)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('-'), KeyModifiers::NONE)),
            Some(InputEvent::RemoveSymbol)
        );
        assert_eq!(map_key(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    fn type_keys(keys: &[KeyEvent]) -> (String, bool) {
        let mut line = String::new();
        let done = keys.iter().any(|key| edit_line(&mut line, *key));
        (line, done)
    }

    #[test]
    fn prompt_line_edits_and_submits() {
        let none = KeyModifiers::NONE;
        let (line, done) = type_keys(&[
            press(KeyCode::Char('a'), none),
            press(KeyCode::Char('x'), none),
            press(KeyCode::Backspace, none),
            press(KeyCode::Char('b'), none),
            press(KeyCode::Enter, none),
        ]);
        assert!(done);
        assert_eq!(line, "ab");

        let (line, done) = type_keys(&[press(KeyCode::Char('a'), none), press(KeyCode::Left, none)]);
        assert!(!done);
        assert_eq!(line, "a");
    }

    #[test]
    fn escape_and_ctrl_c_cancel_the_prompt() {
        let (line, done) = type_keys(&[
            press(KeyCode::Char('a'), KeyModifiers::NONE),
            press(KeyCode::Esc, KeyModifiers::NONE),
        ]);
        assert!(done);
        assert!(line.is_empty());

        let (line, done) = type_keys(&[
            press(KeyCode::Char('a'), KeyModifiers::NONE),
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ]);
        assert!(done);
        assert!(line.is_empty());
    }

    #[test]
    fn release_leaves_alternate_screen_when_raw_mode_fails() {
        let mut out = Vec::new();
        let result = release_to(&mut out, || Err(io::Error::other("not a tty")));

        assert_eq!(result.unwrap_err().to_string(), "not a tty");
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
        assert!(RELEASED.load(Ordering::SeqCst));
    }

    #[test]
    fn directions_pick_colors() {
        assert_eq!(color_of(Direction::Up), Color::Green);
        assert_eq!(color_of(Direction::Down), Color::Red);
        assert_eq!(color_of(Direction::Neutral), Color::White);
    }
}
