//! Per-symbol quote state and its directional coloring.
//!
//! A `Ticker` holds one raw text value per column of [`FIELDS`]. Every value except the
//! symbol starts as [`NOT_AVAILABLE`] and is replaced wholesale by [`Ticker::update`]
//! when a complete response record arrives. Values are stored as received; nothing is
//! parsed as a number.

use strum::Display;

use crate::error::MonitorError;
use crate::fields::{self, CHANGE, FIELDS, RECORD_LEN};
use crate::result::Result;

/// Placeholder shown until the first successful update.
pub const NOT_AVAILABLE: &str = "N/A";

/// Price direction used to pick a cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    /// Uncolored cell.
    Neutral,
    /// Change starts with `+`.
    Up,
    /// Change starts with `-`.
    Down,
}

/// Quote values for one tracked symbol, aligned with [`FIELDS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    values: Vec<String>,
}

impl Ticker {
    /// Creates a ticker whose non-symbol fields are all `N/A`.
    pub fn new(symbol: &str) -> Self {
        let mut values = vec![NOT_AVAILABLE.to_string(); RECORD_LEN];
        values[0] = symbol.to_string();
        Self { values }
    }

    /// Symbol this state belongs to.
    pub fn symbol(&self) -> &str {
        &self.values[0]
    }

    /// Value of the column labelled `label`, if such a column exists.
    pub fn get(&self, label: &str) -> Option<&str> {
        fields::position(label).map(|i| self.values[i].as_str())
    }

    /// Values in column order, symbol first.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replaces every non-symbol field with `new_values`, in column order.
    ///
    /// Fails without touching the state when the number of values does not match the
    /// number of non-symbol columns.
    pub fn update<S: AsRef<str>>(&mut self, new_values: &[S]) -> Result<()> {
        if new_values.len() != RECORD_LEN - 1 {
            return Err(MonitorError::MalformedResponse {
                symbol: self.symbol().to_string(),
                expected: RECORD_LEN,
                found: new_values.len() + 1,
            });
        }
        for (slot, value) in self.values[1..].iter_mut().zip(new_values) {
            *slot = value.as_ref().to_string();
        }
        Ok(())
    }

    /// Color class for the column labelled `label`.
    ///
    /// Directional columns follow the first character of the change value; every other
    /// column, and any change value without a sign, is neutral.
    pub fn direction(&self, label: &str) -> Direction {
        if !fields::is_directional(label) {
            return Direction::Neutral;
        }
        match self.get(CHANGE).and_then(|change| change.chars().next()) {
            Some('+') => Direction::Up,
            Some('-') => Direction::Down,
            _ => Direction::Neutral,
        }
    }

    /// Iterates `(label, value, direction)` for every column, in display order.
    pub fn cells(&self) -> impl Iterator<Item = (&'static str, &str, Direction)> + '_ {
        FIELDS
            .iter()
            .zip(&self.values)
            .map(move |(field, value)| (field.label, value.as_str(), self.direction(field.label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_change(change: &str) -> Ticker {
        let mut ticker = Ticker::new("AAA");
        ticker
            .update(&["10.00", change, "+1%", "9.50", "10.10", "1200"])
            .unwrap();
        ticker
    }

    #[test]
    fn new_ticker_is_not_available() {
        let ticker = Ticker::new("AAA");
        assert_eq!(ticker.symbol(), "AAA");
        assert_eq!(ticker.get("Last"), Some(NOT_AVAILABLE));
        assert_eq!(ticker.get("Volume"), Some(NOT_AVAILABLE));
        assert_eq!(ticker.get("Bid"), None);
    }

    #[test]
    fn update_replaces_all_fields_in_order() {
        let ticker = with_change("+0.25");
        assert_eq!(
            ticker.values(),
            &["AAA", "10.00", "+0.25", "+1%", "9.50", "10.10", "1200"]
        );
    }

    #[test]
    fn short_update_leaves_state_untouched() {
        let mut ticker = Ticker::new("AAA");
        let err = ticker.update(&["1", "2"]).unwrap_err();
        assert!(matches!(
            err,
            MonitorError::MalformedResponse { expected: 7, found: 3, .. }
        ));
        assert_eq!(ticker, Ticker::new("AAA"));
    }

    #[test]
    fn direction_follows_change_sign() {
        assert_eq!(with_change("+1.23").direction("Last"), Direction::Up);
        assert_eq!(with_change("-0.50").direction(CHANGE), Direction::Down);
        assert_eq!(with_change("0.00").direction("Change%"), Direction::Neutral);
        assert_eq!(Ticker::new("AAA").direction(CHANGE), Direction::Neutral);
    }

    #[test]
    fn non_directional_columns_stay_neutral() {
        assert_eq!(with_change("+1.23").direction("Volume"), Direction::Neutral);
        assert_eq!(with_change("-0.50").direction("Low"), Direction::Neutral);
        assert_eq!(with_change("-0.50").direction(fields::SYMBOL), Direction::Neutral);
    }

    #[test]
    fn empty_change_is_neutral() {
        assert_eq!(with_change("").direction("Last"), Direction::Neutral);
    }
}
