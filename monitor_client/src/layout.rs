//! Panel geometry and cell formatting.
//!
//! The screen is split into three stacked panels: the clock on top, the column header
//! below it, and the quote body filling the rest. Every column gets the same width, an
//! even share of the terminal width.

use std::collections::HashMap;

use monitor_common::fields::FIELDS;
use monitor_common::ticker::{Direction, Ticker};

/// Rows reserved for the clock panel.
pub const CLOCK_ROWS: u16 = 2;
/// Rows reserved for the header panel (labels, rule, spacer).
pub const HEADER_ROWS: u16 = 3;

/// Geometry derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
}

/// One formatted body cell.
pub type Cell = (String, Direction);

impl Layout {
    /// Layout for a terminal of `width` x `height`.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// First row of the header panel.
    pub fn header_top(&self) -> u16 {
        CLOCK_ROWS
    }

    /// First row of the body panel.
    pub fn body_top(&self) -> u16 {
        CLOCK_ROWS + HEADER_ROWS
    }

    /// Number of rows available to the body panel.
    pub fn body_rows(&self) -> usize {
        self.height.saturating_sub(self.body_top()) as usize
    }

    /// Width of every column.
    pub fn column_width(&self) -> usize {
        (self.width as usize / FIELDS.len()).max(1)
    }

    /// Column labels, each padded to the column width.
    pub fn header_line(&self) -> String {
        FIELDS
            .iter()
            .map(|f| format_cell(f.label, self.column_width()))
            .collect()
    }

    /// Horizontal rule under the labels.
    pub fn rule_line(&self) -> String {
        "_".repeat(self.width as usize)
    }

    /// Formatted rows for `symbols`, in order, cut to what fits in the body panel.
    ///
    /// Symbols without state are skipped.
    pub fn rows(&self, symbols: &[String], tickers: &HashMap<String, Ticker>) -> Vec<Vec<Cell>> {
        let width = self.column_width();
        symbols
            .iter()
            .filter_map(|symbol| tickers.get(symbol))
            .take(self.body_rows())
            .map(|ticker| {
                ticker
                    .cells()
                    .map(|(_, value, direction)| (format_cell(value, width), direction))
                    .collect()
            })
            .collect()
    }
}

/// Pads `value` with spaces to `width`, truncating it so at least one space separates it
/// from the next column.
pub fn format_cell(value: &str, width: usize) -> String {
    let visible: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{:<width$}", visible, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_padded_and_truncated() {
        assert_eq!(format_cell("AAA", 6), "AAA   ");
        assert_eq!(format_cell("1234567890", 6), "12345 ");
        assert_eq!(format_cell("", 3), "   ");
        assert_eq!(format_cell("AB", 1), " ");
    }

    #[test]
    fn panels_stack_top_to_bottom() {
        let layout = Layout::new(70, 20);
        assert_eq!(layout.header_top(), 2);
        assert_eq!(layout.body_top(), 5);
        assert_eq!(layout.body_rows(), 15);
        assert_eq!(layout.column_width(), 10);
        assert_eq!(layout.header_line().len(), 70);
        assert!(layout.header_line().starts_with("Symbol    Last      Change"));
    }

    #[test]
    fn tiny_terminal_has_no_body() {
        let layout = Layout::new(3, 4);
        assert_eq!(layout.body_rows(), 0);
        assert_eq!(layout.column_width(), 1);
    }

    #[test]
    fn rows_follow_symbol_order_and_fit_the_body() {
        let layout = Layout::new(70, 7);
        let symbols: Vec<String> = ["CCC", "AAA", "BBB"].iter().map(|s| s.to_string()).collect();
        let tickers: HashMap<String, Ticker> = symbols
            .iter()
            .map(|s| (s.clone(), Ticker::new(s)))
            .collect();

        let rows = layout.rows(&symbols, &tickers);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0].0, "CCC       ");
        assert_eq!(rows[1][0].0, "AAA       ");
        assert_eq!(rows[0][1], ("N/A       ".to_string(), Direction::Neutral));
    }
}
