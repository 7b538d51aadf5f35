//! Column definitions of the quote table.
//!
//! Each `DisplayField` pairs the header label shown in the dashboard with the code that
//! requests the field from the quote source. The order of `FIELDS` is the column order,
//! the order of the `f` query parameter, and the order of values in every response
//! record.

/// One column of the quote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayField {
    /// Header text.
    pub label: &'static str,
    /// Wire code requested from the quote source.
    pub code: &'static str,
}

/// Label of the symbol column.
pub const SYMBOL: &str = "Symbol";
/// Label of the column whose sign drives the row coloring.
pub const CHANGE: &str = "Change";

/// Number of values in a complete response record, symbol included.
pub const RECORD_LEN: usize = 7;

/// All columns, in display and wire order. The symbol column is always first.
pub static FIELDS: [DisplayField; RECORD_LEN] = [
    DisplayField { label: SYMBOL, code: "s" },
    DisplayField { label: "Last", code: "l1" },
    DisplayField { label: CHANGE, code: "c1" },
    DisplayField { label: "Change%", code: "p2" },
    DisplayField { label: "Low", code: "g" },
    DisplayField { label: "High", code: "h" },
    DisplayField { label: "Volume", code: "v" },
];

/// Position of `label` in the column order.
pub fn position(label: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.label == label)
}

/// Whether the column is colored by price direction.
///
/// Only the three columns right after the symbol are directional.
pub fn is_directional(label: &str) -> bool {
    FIELDS[1..4].iter().any(|f| f.label == label)
}
