//! Numeric cell helpers shared by `round`, `int` and the aggregates

use crate::error::{Result, SheetError};
use crate::row::Row;

/// Parse a cell as a finite floating-point number
pub fn parse_cell(cell: &[u8]) -> Option<f64> {
    std::str::from_utf8(cell)
        .ok()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Read `column` and parse it, failing with `NotANumber`
pub fn read_number(row: &Row, column: usize) -> Result<f64> {
    let cell = row.read_column(column)?;
    parse_cell(cell).ok_or_else(|| SheetError::NotANumber {
        row: row.number(),
        column,
        value: String::from_utf8_lossy(cell).into_owned(),
    })
}

/// Shortest text that parses back to `value`; negative zero prints as `0`
pub fn format_number(value: f64) -> String {
    format!("{}", value + 0.0)
}
