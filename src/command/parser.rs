//! Argument list parsing
//!
//! Turns the flat command arguments (`rows 2 - toupper 1 acol ...`) into a
//! `CommandList`. Parsing happens once, before any row is read, so every
//! malformed argument is reported before output starts.

use super::operation::{
    AggregateKind, CommandList, Descriptor, Operation, OperationClass, RowRange, Selection,
};
use crate::error::{Result, SheetError};
use crate::row::DelimiterSet;

/// Marker for an open row bound in `rows N -` and `rows - -`
const OPEN_BOUND: &str = "-";

/// Parse the whole argument list
///
/// `delimiters` is needed to reject `cset` values that would split a cell.
pub fn parse_commands<S: AsRef<str>>(args: &[S], delimiters: &DelimiterSet) -> Result<CommandList> {
    let mut cursor = ArgCursor::new(args);
    let mut descriptors = Vec::new();
    let mut pending: Option<(&str, Selection)> = None;

    while let Some(name) = cursor.next() {
        if let Some(selection) = parse_selection(name, &mut cursor)? {
            pending = Some(match pending.take() {
                Some((first, previous)) => (first, previous.and(selection)),
                None => (name, selection),
            });
            continue;
        }

        let operation = parse_operation(name, &mut cursor, delimiters)?;
        let mut descriptor = Descriptor::new(operation);
        if let Some((selection_name, selection)) = pending.take() {
            if descriptor.class() == OperationClass::Table {
                return Err(malformed(format!(
                    "selection '{}' cannot be applied to table command '{}'",
                    selection_name, name
                )));
            }
            descriptor = descriptor.when(selection);
        }
        descriptors.push(descriptor);
    }

    if let Some((name, _)) = pending {
        return Err(malformed(format!(
            "selection '{}' is not followed by a command",
            name
        )));
    }

    tracing::debug!(commands = descriptors.len(), "parsed command list");
    Ok(CommandList::new(descriptors))
}

/// Parse a selection if `name` names one
fn parse_selection(
    name: &str,
    cursor: &mut ArgCursor<'_, impl AsRef<str>>,
) -> Result<Option<Selection>> {
    let selection = match name {
        "rows" => {
            let from = cursor.text(name, "first row")?;
            let to = cursor.text(name, "last row")?;
            Selection::Rows(parse_row_range(from, to)?)
        }
        "beginswith" => Selection::BeginsWith {
            column: cursor.number(name, "column")?,
            text: cursor.text(name, "text")?.to_string(),
        },
        "contains" => Selection::Contains {
            column: cursor.number(name, "column")?,
            text: cursor.text(name, "text")?.to_string(),
        },
        _ => return Ok(None),
    };
    Ok(Some(selection))
}

fn parse_row_range(from: &str, to: &str) -> Result<RowRange> {
    match (from, to) {
        (OPEN_BOUND, OPEN_BOUND) => Ok(RowRange::Last),
        (OPEN_BOUND, _) => Err(malformed(format!(
            "rows: first row must be a number when the last row is {}",
            to
        ))),
        (_, OPEN_BOUND) => Ok(RowRange::From(positive(from, "rows", "first row")?)),
        _ => {
            let from = positive(from, "rows", "first row")?;
            let to = positive(to, "rows", "last row")?;
            interval(from, to)?;
            Ok(RowRange::Between { from, to })
        }
    }
}

fn parse_operation(
    name: &str,
    cursor: &mut ArgCursor<'_, impl AsRef<str>>,
    delimiters: &DelimiterSet,
) -> Result<Operation> {
    let operation = match name {
        "irow" => Operation::InsertRow(cursor.number(name, "row")?),
        "arow" => Operation::AppendRow,
        "drow" => {
            let row = cursor.number(name, "row")?;
            Operation::DeleteRows { from: row, to: row }
        }
        "drows" => {
            let (from, to) = cursor.interval(name)?;
            Operation::DeleteRows { from, to }
        }
        "icol" => Operation::InsertColumn(cursor.number(name, "column")?),
        "acol" => Operation::AppendColumn,
        "dcol" => {
            let column = cursor.number(name, "column")?;
            Operation::DeleteColumns {
                from: column,
                to: column,
            }
        }
        "dcols" => {
            let (from, to) = cursor.interval(name)?;
            Operation::DeleteColumns { from, to }
        }
        "cset" => {
            let column = cursor.number(name, "column")?;
            let value = cursor.text(name, "value")?;
            if let Some(b) = value
                .bytes()
                .find(|b| *b == b'\n' || delimiters.contains(*b))
            {
                return Err(malformed(format!(
                    "cset: value {:?} contains delimiter {:?}",
                    value, b as char
                )));
            }
            Operation::SetCell {
                column,
                value: value.to_string(),
            }
        }
        "tolower" => Operation::Lowercase(cursor.number(name, "column")?),
        "toupper" => Operation::Uppercase(cursor.number(name, "column")?),
        "round" => Operation::Round(cursor.number(name, "column")?),
        "int" => Operation::Truncate(cursor.number(name, "column")?),
        "copy" => Operation::Copy {
            from: cursor.number(name, "source column")?,
            to: cursor.number(name, "target column")?,
        },
        "swap" => Operation::Swap {
            first: cursor.number(name, "column")?,
            second: cursor.number(name, "column")?,
        },
        "move" => Operation::Move {
            column: cursor.number(name, "column")?,
            before: cursor.number(name, "target column")?,
        },
        "csum" | "cavg" | "cmin" | "cmax" | "ccount" => {
            let kind = match name {
                "csum" => AggregateKind::Sum,
                "cavg" => AggregateKind::Average,
                "cmin" => AggregateKind::Min,
                "cmax" => AggregateKind::Max,
                _ => AggregateKind::Count,
            };
            let target = cursor.number(name, "target column")?;
            let (from, to) = cursor.interval(name)?;
            if (from..=to).contains(&target) {
                return Err(malformed(format!(
                    "{}: target column {} lies inside {}..{}",
                    name, target, from, to
                )));
            }
            Operation::Aggregate {
                kind,
                target,
                from,
                to,
            }
        }
        "cseq" => {
            let (from, to) = cursor.interval(name)?;
            let raw = cursor.text(name, "start value")?;
            let start = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| malformed(format!("cseq: start value {:?} is not a number", raw)))?;
            Operation::Sequence { from, to, start }
        }
        _ => return Err(malformed(format!("unknown command '{}'", name))),
    };
    Ok(operation)
}

/// Forward-only view over the argument list
struct ArgCursor<'a, S> {
    args: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> ArgCursor<'a, S> {
    fn new(args: &'a [S]) -> Self {
        Self { args, pos: 0 }
    }

    fn next(&mut self) -> Option<&'a str> {
        let arg = self.args.get(self.pos)?;
        self.pos += 1;
        Some(arg.as_ref())
    }

    fn text(&mut self, command: &str, what: &str) -> Result<&'a str> {
        self.next()
            .ok_or_else(|| malformed(format!("{}: missing {}", command, what)))
    }

    fn number(&mut self, command: &str, what: &str) -> Result<usize> {
        let raw = self.text(command, what)?;
        positive(raw, command, what)
    }

    fn interval(&mut self, command: &str) -> Result<(usize, usize)> {
        let from = self.number(command, "first")?;
        let to = self.number(command, "last")?;
        interval(from, to)?;
        Ok((from, to))
    }
}

/// Parse a 1-based index; zero and anything non-numeric are malformed
fn positive(raw: &str, command: &str, what: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(malformed(format!(
            "{}: {} must be a positive integer, got {:?}",
            command, what, raw
        ))),
    }
}

fn interval(from: usize, to: usize) -> Result<()> {
    if from > to {
        Err(SheetError::InvalidInterval { from, to })
    } else {
        Ok(())
    }
}

fn malformed(msg: String) -> SheetError {
    SheetError::MalformedArgument(msg)
}
