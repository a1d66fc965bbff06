//! Fixed-capacity row buffer
//!
//! A `Row` owns one line of input as raw bytes, always terminated by `\n`.
//! The buffer is allocated once at `max_row_size` and never grows: every
//! mutation checks the resulting length first and reports `RowTooLarge`
//! instead of reallocating.
//!
//! # Architecture
//!
//! ```text
//! raw line ─▶ Row::load ─▶ delimiter::unify ─▶ validate ─▶ columns (read/write)
//! ```

mod columns;
mod delimiter;
mod validate;

pub use delimiter::{unify, DelimiterSet};
pub use validate::{check_column_count, validate};

use crate::error::{Result, SheetError};

/// Default row capacity in bytes, newline included
pub const DEFAULT_MAX_ROW_SIZE: usize = 10 * 1024;

/// Default maximum cell length in bytes
pub const DEFAULT_MAX_CELL_SIZE: usize = 100;

/// Largest row capacity `Limits::new` accepts (64 MiB)
///
/// The row buffer is allocated up front at full capacity, so this also
/// bounds the memory a single run reserves per buffer.
pub const MAX_ROW_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Size limits applied to every row and cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Row capacity in bytes, including the trailing newline
    pub max_row_size: usize,
    /// Maximum bytes between two delimiters
    pub max_cell_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_row_size: DEFAULT_MAX_ROW_SIZE,
            max_cell_size: DEFAULT_MAX_CELL_SIZE,
        }
    }
}

impl Limits {
    /// Build limits, rejecting sizes that could never hold a row
    pub fn new(max_row_size: usize, max_cell_size: usize) -> Result<Self> {
        if max_row_size < 2 {
            return Err(SheetError::MalformedArgument(format!(
                "max_row_size must be at least 2, got {}",
                max_row_size
            )));
        }
        if max_row_size > MAX_ROW_SIZE_LIMIT {
            return Err(SheetError::MalformedArgument(format!(
                "max_row_size must be at most {}, got {}",
                MAX_ROW_SIZE_LIMIT, max_row_size
            )));
        }
        if max_cell_size == 0 || max_cell_size >= max_row_size {
            return Err(SheetError::MalformedArgument(format!(
                "max_cell_size must be between 1 and {}, got {}",
                max_row_size - 1,
                max_cell_size
            )));
        }
        Ok(Self {
            max_row_size,
            max_cell_size,
        })
    }

    /// Check if a cell value fits
    pub fn cell_fits(&self, len: usize) -> bool {
        len <= self.max_cell_size
    }
}

/// One line of the table, mutated in place by the pipeline
#[derive(Debug, Clone)]
pub struct Row {
    buf: Vec<u8>,
    limits: Limits,
    delimiter: u8,
    number: usize,
    deleted: bool,
    is_last: bool,
}

impl Row {
    /// Create an empty row buffer with room for `limits.max_row_size` bytes
    pub fn new(limits: Limits, delimiter: u8) -> Self {
        Self {
            buf: Vec::with_capacity(limits.max_row_size),
            limits,
            delimiter,
            number: 0,
            deleted: false,
            is_last: false,
        }
    }

    /// Build a row holding `line`, numbered 1 and marked as the last row
    pub fn from_line(line: &[u8], limits: Limits, delimiter: u8) -> Result<Self> {
        let mut row = Self::new(limits, delimiter);
        row.load(1, line, true)?;
        Ok(row)
    }

    /// Refill the buffer with a new line and re-tag it
    ///
    /// A missing trailing newline is added. The previous content is left
    /// untouched if the line does not fit.
    pub fn load(&mut self, number: usize, line: &[u8], is_last: bool) -> Result<()> {
        let has_newline = line.last() == Some(&b'\n');
        let needed = if has_newline { line.len() } else { line.len() + 1 };
        if needed > self.capacity() {
            return Err(SheetError::RowTooLarge { row: number });
        }

        self.buf.clear();
        self.buf.extend_from_slice(line);
        if !has_newline {
            self.buf.push(b'\n');
        }
        self.number = number;
        self.deleted = false;
        self.is_last = is_last;
        Ok(())
    }

    /// Full row bytes, newline included
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Row bytes without the trailing newline
    pub fn content(&self) -> &[u8] {
        match self.buf.split_last() {
            Some((b'\n', rest)) => rest,
            _ => &self.buf,
        }
    }

    pub(crate) fn content_mut(&mut self) -> &mut [u8] {
        let len = self.content().len();
        &mut self.buf[..len]
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Fixed capacity in bytes
    pub fn capacity(&self) -> usize {
        self.limits.max_row_size
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Canonical delimiter of this row
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub(crate) fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    /// 1-based sequence number in the input stream
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// True when no further row follows in the stream
    pub fn is_last(&self) -> bool {
        self.is_last
    }
}
