//! Row selection for data-processing commands

use crate::command::{RowRange, Selection};
use crate::error::Result;
use crate::row::Row;

/// Decide whether a command gated by `selection` applies to `row`
///
/// No selection accepts every row. A selection naming a column the row does
/// not have is an error, not a mismatch.
pub fn accepts(selection: Option<&Selection>, row: &Row) -> Result<bool> {
    match selection {
        None => Ok(true),
        Some(selection) => matches(selection, row),
    }
}

fn matches(selection: &Selection, row: &Row) -> Result<bool> {
    match selection {
        Selection::Rows(range) => Ok(in_range(*range, row)),
        Selection::BeginsWith { column, text } => {
            Ok(row.read_column(*column)?.starts_with(text.as_bytes()))
        }
        Selection::Contains { column, text } => {
            Ok(contains(row.read_column(*column)?, text.as_bytes()))
        }
        Selection::All(parts) => {
            for part in parts {
                if !matches(part, row)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

fn in_range(range: RowRange, row: &Row) -> bool {
    let number = row.number();
    match range {
        RowRange::Between { from, to } => (from..=to).contains(&number),
        RowRange::From(from) => number >= from,
        RowRange::Last => row.is_last(),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
