//! Properties that hold for any well-formed row

mod common;

use common::edit;
use sheet::{Limits, Row};

const ROWS: &[&str] = &["a,b,c", "1,,3", ",,", "Mixed,Case,42.5", "x"];

#[test]
fn test_write_then_read_column() {
    for line in ROWS {
        let mut row = Row::from_line(line.as_bytes(), Limits::default(), b',').unwrap();
        for column in 1..=row.column_count() {
            row.write_column(column, b"val").unwrap();
            assert_eq!(row.read_column(column).unwrap(), b"val", "{line} col {column}");
        }
    }
}

#[test]
fn test_swap_twice_is_identity() {
    for line in ROWS.iter().filter(|l| l.contains(',')) {
        let input = format!("{line}\n");
        let once = edit(&input, ",", &["swap", "1", "2"]);
        assert_eq!(edit(&once, ",", &["swap", "1", "2"]), input);
    }
}

#[test]
fn test_case_conversion_is_idempotent() {
    for line in ROWS {
        let input = format!("{line}\n");
        for op in ["tolower", "toupper"] {
            let once = edit(&input, ",", &[op, "1"]);
            assert_eq!(edit(&once, ",", &[op, "1"]), once);
        }
    }
}

#[test]
fn test_delete_all_columns_then_append() {
    for line in ROWS {
        let input = format!("{line}\n");
        let count = line.split(',').count().to_string();
        assert_eq!(edit(&input, ",", &["dcols", "1", &count, "acol"]), ",\n");
    }
}

#[test]
fn test_output_uses_canonical_delimiter_only() {
    let output = edit("a;b:c\nd:e;f\n", ":;", &[]);
    assert!(!output.contains(';'));
    assert_eq!(output, "a:b:c\nd:e:f\n");
}
