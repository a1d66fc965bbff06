//! Table-editing commands
//!
//! These run before any data-processing command. Row insertion does not
//! touch the current row; it only asks the pipeline to emit an empty row in
//! front of it. `arow` is handled by the pipeline after the last row.

use crate::command::Operation;
use crate::error::Result;
use crate::row::Row;

/// What a table command did to the current row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOutcome {
    /// Command did not apply to this row
    Unchanged,
    /// Row was edited or marked deleted
    Modified,
    /// An empty row must be emitted before this row
    InsertRowBefore,
}

/// Apply one table-editing command to `row`
///
/// Column commands skip rows that are already deleted.
pub fn apply_table(operation: &Operation, row: &mut Row) -> Result<TableOutcome> {
    let outcome = match operation {
        Operation::InsertRow(at) => {
            if row.number() == *at {
                TableOutcome::InsertRowBefore
            } else {
                TableOutcome::Unchanged
            }
        }
        Operation::DeleteRows { from, to } => {
            if !row.is_deleted() && (*from..=*to).contains(&row.number()) {
                row.mark_deleted();
                TableOutcome::Modified
            } else {
                TableOutcome::Unchanged
            }
        }
        Operation::AppendRow => TableOutcome::Unchanged,
        _ if row.is_deleted() => TableOutcome::Unchanged,
        Operation::InsertColumn(at) => {
            row.insert_column(*at, b"")?;
            TableOutcome::Modified
        }
        Operation::AppendColumn => {
            row.append_column(b"")?;
            TableOutcome::Modified
        }
        Operation::DeleteColumns { from, to } => {
            row.delete_columns(*from, *to)?;
            TableOutcome::Modified
        }
        _ => TableOutcome::Unchanged,
    };
    tracing::trace!(row = row.number(), command = operation.name(), ?outcome, "table command");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::row::Limits;

    fn row(number: usize, line: &str) -> Row {
        let mut row = Row::new(Limits::default(), b' ');
        row.load(number, line.as_bytes(), false).unwrap();
        row
    }

    fn text(row: &Row) -> &str {
        std::str::from_utf8(row.as_bytes()).unwrap()
    }

    #[test]
    fn test_insert_row_only_on_matching_number() {
        let mut r = row(2, "a b");
        assert_eq!(
            apply_table(&Operation::InsertRow(2), &mut r).unwrap(),
            TableOutcome::InsertRowBefore
        );
        assert_eq!(
            apply_table(&Operation::InsertRow(3), &mut r).unwrap(),
            TableOutcome::Unchanged
        );
        assert_eq!(text(&r), "a b\n");
    }

    #[test]
    fn test_delete_rows_marks_in_range() {
        let op = Operation::DeleteRows { from: 2, to: 3 };
        let mut inside = row(3, "a");
        let mut outside = row(4, "a");
        assert_eq!(
            apply_table(&op, &mut inside).unwrap(),
            TableOutcome::Modified
        );
        assert!(inside.is_deleted());
        assert_eq!(
            apply_table(&op, &mut outside).unwrap(),
            TableOutcome::Unchanged
        );
        assert!(!outside.is_deleted());
    }

    #[test]
    fn test_append_column_adds_trailing_delimiter() {
        let mut r = row(1, "x y");
        apply_table(&Operation::AppendColumn, &mut r).unwrap();
        assert_eq!(text(&r), "x y \n");
        assert_eq!(r.column_count(), 3);
    }

    #[test]
    fn test_insert_column_before() {
        let mut r = row(1, "x y");
        apply_table(&Operation::InsertColumn(2), &mut r).unwrap();
        assert_eq!(text(&r), "x  y\n");
    }

    #[test]
    fn test_insert_column_out_of_range() {
        let mut r = row(1, "x y");
        assert_eq!(
            apply_table(&Operation::InsertColumn(3), &mut r),
            Err(SheetError::ColumnNotFound { row: 1, column: 3 })
        );
    }

    #[test]
    fn test_delete_columns() {
        let mut r = row(1, "a b c d");
        apply_table(&Operation::DeleteColumns { from: 3, to: 4 }, &mut r).unwrap();
        assert_eq!(text(&r), "a b\n");
    }

    #[test]
    fn test_deleted_row_skips_column_commands() {
        let mut r = row(1, "a b");
        apply_table(&Operation::DeleteRows { from: 1, to: 1 }, &mut r).unwrap();
        assert_eq!(
            apply_table(&Operation::AppendColumn, &mut r).unwrap(),
            TableOutcome::Unchanged
        );
        assert_eq!(
            apply_table(&Operation::DeleteColumns { from: 5, to: 9 }, &mut r).unwrap(),
            TableOutcome::Unchanged
        );
        assert_eq!(text(&r), "a b\n");
    }

    #[test]
    fn test_append_column_without_capacity() {
        let limits = Limits::new(4, 2).unwrap();
        let mut r = Row::new(limits, b' ');
        r.load(1, b"a b\n", true).unwrap();
        assert_eq!(
            apply_table(&Operation::AppendColumn, &mut r),
            Err(SheetError::RowTooLarge { row: 1 })
        );
    }

    #[test]
    fn test_data_commands_are_ignored() {
        let mut r = row(1, "a");
        assert_eq!(
            apply_table(&Operation::Uppercase(1), &mut r).unwrap(),
            TableOutcome::Unchanged
        );
    }
}
