//! Symbol normalization and parsing of symbol lists from files.

use std::io::BufRead;

use crate::error::MonitorError;

/// Trims and uppercases user or file input.
///
/// Returns `None` when nothing is left, so callers can silently ignore empty input.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces, or new lines. Blank entries are
    /// skipped and every symbol is uppercased. Returns an error if a line cannot be read.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<String>, MonitorError>;
}

/// Marker type implementing [`SymbolParser`] for plain-text symbol lists.
pub struct SymbolFile;

impl SymbolParser for SymbolFile {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<String>, MonitorError> {
        let mut symbols = Vec::new();

        for line_result in reader.lines() {
            let line =
                line_result.map_err(|e| MonitorError::ParseTickersFile(e.to_string()))?;
            let entries = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter_map(normalize_symbol);
            for symbol in entries {
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn normalize_uppercases_and_trims() {
        assert_eq!(normalize_symbol("  aapl \n"), Some("AAPL".to_string()));
        assert_eq!(normalize_symbol("   "), None);
        assert_eq!(normalize_symbol(""), None);
    }

    #[test]
    fn parses_mixed_separators_without_duplicates() {
        let input = Cursor::new("aapl, msft\n\nGOOGL tsla\nmsft,\n");
        let symbols = SymbolFile::parse_from_file(input).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "GOOGL", "TSLA"]);
    }
}
