//! Line reader with one row of lookahead
//!
//! The reader keeps the next raw line buffered so the current row can be
//! tagged `is_last`. No line is ever buffered beyond `max_row_size + 1`
//! bytes; an over-long line is cut there and rejected by `Row::load`.

use std::io::{BufRead, Read};

use crate::error::{Result, SheetError};
use crate::row::Row;

pub struct RowReader<R> {
    input: R,
    limit: u64,
    current: Vec<u8>,
    next: Vec<u8>,
    has_next: bool,
    started: bool,
    rows_read: usize,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(input: R, max_row_size: usize) -> Result<Self> {
        let buffered = max_row_size.checked_add(1).ok_or_else(|| {
            SheetError::MalformedArgument(format!("max_row_size {} is too large", max_row_size))
        })?;
        Ok(Self {
            input,
            limit: buffered as u64,
            current: Vec::with_capacity(buffered),
            next: Vec::with_capacity(buffered),
            has_next: false,
            started: false,
            rows_read: 0,
        })
    }

    /// Load the next line into `row`; returns `false` at end of input
    pub fn next_into(&mut self, row: &mut Row) -> Result<bool> {
        if !self.started {
            self.started = true;
            self.has_next = self.fill_next()?;
        }
        if !self.has_next {
            return Ok(false);
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.has_next = self.fill_next()?;
        self.rows_read += 1;
        row.load(self.rows_read, &self.current, !self.has_next)?;
        Ok(true)
    }

    /// Rows handed out so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    fn fill_next(&mut self) -> Result<bool> {
        self.next.clear();
        let read = self
            .input
            .by_ref()
            .take(self.limit)
            .read_until(b'\n', &mut self.next)?;
        Ok(read > 0)
    }
}
