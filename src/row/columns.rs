//! Column addressing over the row buffer
//!
//! Columns are not stored; they are found by counting delimiters from the
//! start of the row. Column numbers are 1-based. Column `n` starts right after
//! the `(n-1)`th delimiter and its cell extends up to (not including) the
//! next delimiter or the newline.

use std::ops::Range;

use super::Row;
use crate::error::{Result, SheetError};

impl Row {
    /// Number of columns (delimiters + 1)
    pub fn column_count(&self) -> usize {
        let delimiter = self.delimiter();
        self.content().iter().filter(|b| **b == delimiter).count() + 1
    }

    /// Byte index where column `column` starts
    pub fn column_offset(&self, column: usize) -> Result<usize> {
        if column == 0 {
            return Err(self.column_not_found(column));
        }
        if column == 1 {
            return Ok(0);
        }

        let delimiter = self.delimiter();
        let mut seen = 0;
        for (idx, byte) in self.content().iter().enumerate() {
            if *byte == delimiter {
                seen += 1;
                if seen == column - 1 {
                    return Ok(idx + 1);
                }
            }
        }
        Err(self.column_not_found(column))
    }

    /// Byte range of the cell in `column`, excluding delimiters
    pub fn column_range(&self, column: usize) -> Result<Range<usize>> {
        let start = self.column_offset(column)?;
        let content = self.content();
        let delimiter = self.delimiter();
        let end = content[start..]
            .iter()
            .position(|b| *b == delimiter)
            .map_or(content.len(), |pos| start + pos);
        Ok(start..end)
    }

    /// Cell content of `column`
    pub fn read_column(&self, column: usize) -> Result<&[u8]> {
        let range = self.column_range(column)?;
        Ok(&self.as_bytes()[range])
    }

    /// Replace the cell in `column` with `value`
    ///
    /// Everything after the cell shifts by the length difference. On error the
    /// row is left unchanged.
    pub fn write_column(&mut self, column: usize, value: &[u8]) -> Result<()> {
        self.check_cell(column, value)?;
        let range = self.column_range(column)?;
        self.replace_span(range, value)
    }

    /// Insert a new cell holding `value` before `column`
    pub fn insert_column(&mut self, column: usize, value: &[u8]) -> Result<()> {
        self.check_cell(column, value)?;
        let at = self.column_offset(column)?;
        let mut scratch = Vec::with_capacity(value.len() + 1);
        scratch.extend_from_slice(value);
        scratch.push(self.delimiter());
        self.replace_span(at..at, &scratch)
    }

    /// Add a new last cell holding `value`
    pub fn append_column(&mut self, value: &[u8]) -> Result<()> {
        let column = self.column_count() + 1;
        self.check_cell(column, value)?;
        let end = self.content().len();
        let mut scratch = Vec::with_capacity(value.len() + 1);
        scratch.push(self.delimiter());
        scratch.extend_from_slice(value);
        self.replace_span(end..end, &scratch)
    }

    /// Remove columns `from..=to` together with their delimiters
    ///
    /// Removing every column leaves a single empty column.
    pub fn delete_columns(&mut self, from: usize, to: usize) -> Result<()> {
        if from == 0 || from > to {
            return Err(SheetError::InvalidInterval { from, to });
        }
        let count = self.column_count();
        if to > count {
            return Err(self.column_not_found(to));
        }

        let end_of_content = self.content().len();
        let span = if from == 1 && to == count {
            0..end_of_content
        } else if to == count {
            // Drop the delimiter that precedes `from` so the row ends in a cell
            self.column_offset(from)? - 1..end_of_content
        } else {
            self.column_offset(from)?..self.column_offset(to + 1)?
        };
        self.replace_span(span, &[])
    }

    fn check_cell(&self, column: usize, value: &[u8]) -> Result<()> {
        if self.limits().cell_fits(value.len()) {
            Ok(())
        } else {
            Err(SheetError::CellTooLarge {
                row: self.number(),
                column,
            })
        }
    }

    fn column_not_found(&self, column: usize) -> SheetError {
        SheetError::ColumnNotFound {
            row: self.number(),
            column,
        }
    }

    /// Replace `range` of the buffer with `bytes`, within the fixed capacity
    fn replace_span(&mut self, range: Range<usize>, bytes: &[u8]) -> Result<()> {
        let new_len = self.len() - range.len() + bytes.len();
        if new_len > self.capacity() {
            return Err(SheetError::RowTooLarge { row: self.number() });
        }
        self.buf.splice(range, bytes.iter().copied());
        Ok(())
    }
}
