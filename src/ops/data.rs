//! Data-processing commands
//!
//! Each command reads one or more cells, transforms them, and writes the
//! result back through the row's column primitives. `apply_data` reports
//! whether the command took effect so the pipeline can enforce the
//! one-data-command-per-row rule.

use super::number::{format_number, parse_cell, read_number};
use crate::command::{AggregateKind, Operation};
use crate::error::{Result, SheetError};
use crate::row::Row;

/// Apply one data-processing command to `row`
///
/// Returns `false` when the command is a no-op for this row (`copy`, `swap`
/// and `move` with an out-of-range or identical column).
pub fn apply_data(operation: &Operation, row: &mut Row) -> Result<bool> {
    let applied = match operation {
        Operation::SetCell { column, value } => {
            row.write_column(*column, value.as_bytes())?;
            true
        }
        Operation::Lowercase(column) => {
            let mut cell = row.read_column(*column)?.to_vec();
            cell.make_ascii_lowercase();
            row.write_column(*column, &cell)?;
            true
        }
        Operation::Uppercase(column) => {
            let mut cell = row.read_column(*column)?.to_vec();
            cell.make_ascii_uppercase();
            row.write_column(*column, &cell)?;
            true
        }
        Operation::Round(column) => {
            let value = read_number(row, *column)?;
            row.write_column(*column, format_number(value.round()).as_bytes())?;
            true
        }
        Operation::Truncate(column) => {
            read_number(row, *column)?;
            let cell = row.read_column(*column)?;
            let cut = cell.iter().position(|b| *b == b'.').unwrap_or(cell.len());
            let integer = cell[..cut].to_vec();
            row.write_column(*column, &integer)?;
            true
        }
        Operation::Copy { from, to } => copy(row, *from, *to)?,
        Operation::Swap { first, second } => swap(row, *first, *second)?,
        Operation::Move { column, before } => move_column(row, *column, *before)?,
        Operation::Aggregate {
            kind,
            target,
            from,
            to,
        } => {
            aggregate(row, *kind, *target, *from, *to)?;
            true
        }
        Operation::Sequence { from, to, start } => {
            sequence(row, *from, *to, *start)?;
            true
        }
        _ => false,
    };
    tracing::trace!(row = row.number(), command = operation.name(), applied, "data command");
    Ok(applied)
}

fn both_exist(row: &Row, a: usize, b: usize) -> bool {
    let count = row.column_count();
    a != b && a <= count && b <= count
}

fn copy(row: &mut Row, from: usize, to: usize) -> Result<bool> {
    if !both_exist(row, from, to) {
        return Ok(false);
    }
    let value = row.read_column(from)?.to_vec();
    row.write_column(to, &value)?;
    Ok(true)
}

fn swap(row: &mut Row, first: usize, second: usize) -> Result<bool> {
    if !both_exist(row, first, second) {
        return Ok(false);
    }
    let a = row.read_column(first)?.to_vec();
    let b = row.read_column(second)?.to_vec();
    row.write_column(first, &b)?;
    row.write_column(second, &a)?;
    Ok(true)
}

/// Move `column` so that it ends up directly before `before`
fn move_column(row: &mut Row, column: usize, before: usize) -> Result<bool> {
    if !both_exist(row, column, before) {
        return Ok(false);
    }
    let value = row.read_column(column)?.to_vec();
    row.delete_columns(column, column)?;
    // Target shifts left when the removed column preceded it
    let target = if before > column { before - 1 } else { before };
    row.insert_column(target, &value)?;
    Ok(true)
}

fn require_column(row: &Row, column: usize) -> Result<()> {
    if column > row.column_count() {
        Err(SheetError::ColumnNotFound {
            row: row.number(),
            column,
        })
    } else {
        Ok(())
    }
}

fn aggregate(
    row: &mut Row,
    kind: AggregateKind,
    target: usize,
    from: usize,
    to: usize,
) -> Result<()> {
    require_column(row, target)?;
    require_column(row, to)?;

    let mut numbers = Vec::with_capacity(to - from + 1);
    let mut non_empty = 0usize;
    for column in from..=to {
        let cell = row.read_column(column)?;
        if !cell.is_empty() {
            non_empty += 1;
        }
        if let Some(value) = parse_cell(cell) {
            numbers.push(value);
        }
    }

    let result = match kind {
        AggregateKind::Count => non_empty.to_string(),
        AggregateKind::Sum => format_number(numbers.iter().sum()),
        _ if numbers.is_empty() => String::new(),
        AggregateKind::Average => {
            format_number(numbers.iter().sum::<f64>() / numbers.len() as f64)
        }
        AggregateKind::Min => format_number(numbers.iter().copied().fold(f64::INFINITY, f64::min)),
        AggregateKind::Max => {
            format_number(numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        }
    };
    row.write_column(target, result.as_bytes())
}

fn sequence(row: &mut Row, from: usize, to: usize, start: f64) -> Result<()> {
    require_column(row, to)?;
    for (step, column) in (from..=to).enumerate() {
        let value = format_number(start + step as f64);
        row.write_column(column, value.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Limits;

    fn row(line: &str) -> Row {
        Row::from_line(line.as_bytes(), Limits::default(), b',').unwrap()
    }

    fn run(op: Operation, line: &str) -> Result<(bool, String)> {
        let mut r = row(line);
        let applied = apply_data(&op, &mut r)?;
        Ok((applied, String::from_utf8(r.as_bytes().to_vec()).unwrap()))
    }

    fn output(op: Operation, line: &str) -> String {
        run(op, line).unwrap().1
    }

    #[test]
    fn test_set_cell() {
        let op = Operation::SetCell {
            column: 2,
            value: "new".to_string(),
        };
        assert_eq!(output(op, "a,b,c"), "a,new,c\n");
    }

    #[test]
    fn test_set_cell_too_large() {
        let limits = Limits::new(64, 3).unwrap();
        let mut r = Row::from_line(b"a,b", limits, b',').unwrap();
        let op = Operation::SetCell {
            column: 1,
            value: "abcd".to_string(),
        };
        assert_eq!(
            apply_data(&op, &mut r),
            Err(SheetError::CellTooLarge { row: 1, column: 1 })
        );
    }

    #[test]
    fn test_set_cell_missing_column() {
        let op = Operation::SetCell {
            column: 4,
            value: "x".to_string(),
        };
        assert_eq!(
            run(op, "a,b"),
            Err(SheetError::ColumnNotFound { row: 1, column: 4 })
        );
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(output(Operation::Uppercase(2), "a,b-c9,d"), "a,B-C9,d\n");
        assert_eq!(output(Operation::Lowercase(1), "MiXeD,X"), "mixed,X\n");
    }

    #[test]
    fn test_case_conversion_is_idempotent() {
        let once = output(Operation::Lowercase(1), "AbC,d");
        let twice = output(Operation::Lowercase(1), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(output(Operation::Round(1), "2.5"), "3\n");
        assert_eq!(output(Operation::Round(1), "-2.5"), "-3\n");
        assert_eq!(output(Operation::Round(1), "2.49"), "2\n");
        assert_eq!(output(Operation::Round(1), "-0.4"), "0\n");
        assert_eq!(output(Operation::Round(1), "7"), "7\n");
    }

    #[test]
    fn test_round_not_a_number() {
        assert_eq!(
            run(Operation::Round(2), "1,abc"),
            Err(SheetError::NotANumber {
                row: 1,
                column: 2,
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_truncate_cuts_at_decimal_point() {
        assert_eq!(output(Operation::Truncate(1), "3.99,x"), "3,x\n");
        assert_eq!(output(Operation::Truncate(1), "-7.2"), "-7\n");
        assert_eq!(output(Operation::Truncate(1), "42"), "42\n");
    }

    #[test]
    fn test_truncate_rejects_text() {
        assert!(matches!(
            run(Operation::Truncate(1), "1.2.3"),
            Err(SheetError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_copy() {
        assert_eq!(
            output(Operation::Copy { from: 1, to: 3 }, "a,b,c"),
            "a,b,a\n"
        );
    }

    #[test]
    fn test_copy_out_of_range_is_noop() {
        let (applied, line) = run(Operation::Copy { from: 1, to: 9 }, "a,b").unwrap();
        assert!(!applied);
        assert_eq!(line, "a,b\n");
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let once = output(
            Operation::Swap {
                first: 1,
                second: 3,
            },
            "one,two,three",
        );
        assert_eq!(once, "three,two,one\n");
        let twice = output(
            Operation::Swap {
                first: 1,
                second: 3,
            },
            &once,
        );
        assert_eq!(twice, "one,two,three\n");
    }

    #[test]
    fn test_swap_same_column_is_noop() {
        let (applied, _) = run(
            Operation::Swap {
                first: 2,
                second: 2,
            },
            "a,b",
        )
        .unwrap();
        assert!(!applied);
    }

    #[test]
    fn test_move_backwards() {
        assert_eq!(
            output(
                Operation::Move {
                    column: 3,
                    before: 1
                },
                "a,b,c"
            ),
            "c,a,b\n"
        );
    }

    #[test]
    fn test_move_forwards() {
        assert_eq!(
            output(
                Operation::Move {
                    column: 1,
                    before: 3
                },
                "a,b,c"
            ),
            "b,a,c\n"
        );
        assert_eq!(
            output(
                Operation::Move {
                    column: 1,
                    before: 4
                },
                "a,b,c,d"
            ),
            "b,c,a,d\n"
        );
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let (applied, line) = run(
            Operation::Move {
                column: 5,
                before: 1,
            },
            "a,b",
        )
        .unwrap();
        assert!(!applied);
        assert_eq!(line, "a,b\n");
    }

    fn agg(kind: AggregateKind, target: usize, from: usize, to: usize) -> Operation {
        Operation::Aggregate {
            kind,
            target,
            from,
            to,
        }
    }

    #[test]
    fn test_sum_skips_non_numeric() {
        assert_eq!(
            output(agg(AggregateKind::Sum, 1, 2, 4), ",1,x,2.5"),
            "3.5,1,x,2.5\n"
        );
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        assert_eq!(output(agg(AggregateKind::Sum, 1, 2, 2), "9,x"), "0,x\n");
    }

    #[test]
    fn test_average_min_max() {
        assert_eq!(
            output(agg(AggregateKind::Average, 4, 1, 3), "1,2,6,"),
            "1,2,6,3\n"
        );
        assert_eq!(
            output(agg(AggregateKind::Min, 4, 1, 3), "5,-2,6,"),
            "5,-2,6,-2\n"
        );
        assert_eq!(
            output(agg(AggregateKind::Max, 4, 1, 3), "5,-2,6,"),
            "5,-2,6,6\n"
        );
    }

    #[test]
    fn test_average_without_numbers_is_empty() {
        assert_eq!(
            output(agg(AggregateKind::Average, 1, 2, 3), "old,a,"),
            ",a,\n"
        );
    }

    #[test]
    fn test_count_non_empty() {
        assert_eq!(
            output(agg(AggregateKind::Count, 1, 2, 5), ",a,,3,x"),
            "3,a,,3,x\n"
        );
    }

    #[test]
    fn test_aggregate_missing_column() {
        assert!(matches!(
            run(agg(AggregateKind::Sum, 1, 2, 5), "a,b"),
            Err(SheetError::ColumnNotFound { column: 5, .. })
        ));
    }

    #[test]
    fn test_sequence() {
        let op = Operation::Sequence {
            from: 2,
            to: 4,
            start: 1.0,
        };
        assert_eq!(output(op, "a,b,c,d,e"), "a,1,2,3,e\n");
    }

    #[test]
    fn test_table_commands_are_ignored() {
        let (applied, _) = run(Operation::AppendColumn, "a").unwrap();
        assert!(!applied);
    }
}
