//! Row-level structural checks, run after unification

use super::Row;
use crate::error::{Result, SheetError};

/// Check row termination and every cell's length
pub fn validate(row: &Row) -> Result<()> {
    if row.as_bytes().last() != Some(&b'\n') || row.len() > row.capacity() {
        return Err(SheetError::RowTooLarge { row: row.number() });
    }

    let max_cell = row.limits().max_cell_size;
    for (idx, cell) in row.content().split(|b| *b == row.delimiter()).enumerate() {
        if cell.len() > max_cell {
            return Err(SheetError::CellTooLarge {
                row: row.number(),
                column: idx + 1,
            });
        }
    }
    Ok(())
}

/// Check the row against the column count fixed by the first row
pub fn check_column_count(row: &Row, expected: usize) -> Result<()> {
    let found = row.column_count();
    if found != expected {
        return Err(SheetError::ColumnMismatch {
            row: row.number(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Limits;

    fn limits() -> Limits {
        Limits::new(64, 4).unwrap()
    }

    #[test]
    fn test_cell_at_limit_passes() {
        let row = Row::from_line(b"abcd x\n", limits(), b' ').unwrap();
        assert!(validate(&row).is_ok());
    }

    #[test]
    fn test_cell_over_limit_fails_with_column() {
        let row = Row::from_line(b"x abcde\n", limits(), b' ').unwrap();
        assert_eq!(
            validate(&row),
            Err(SheetError::CellTooLarge { row: 1, column: 2 })
        );
    }

    #[test]
    fn test_last_cell_is_checked() {
        let row = Row::from_line(b"a b abcdef", limits(), b' ').unwrap();
        assert_eq!(
            validate(&row),
            Err(SheetError::CellTooLarge { row: 1, column: 3 })
        );
    }

    #[test]
    fn test_column_count_mismatch() {
        let row = Row::from_line(b"a b\n", limits(), b' ').unwrap();
        assert!(check_column_count(&row, 2).is_ok());
        assert_eq!(
            check_column_count(&row, 3),
            Err(SheetError::ColumnMismatch {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }
}
