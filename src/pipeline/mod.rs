//! Streaming pipeline: read, unify, validate, execute, emit
//!
//! # Architecture
//!
//! ```text
//! RowReader ──▶ Row ──▶ unify ──▶ validate ──▶ column count check
//!                                                  │
//!                      Executor (table pass, data pass) ◀─┘
//!                                  │
//!              irow rows ─▶ output ◀─ row (unless deleted)
//!                                  │
//!                       after last row: arow rows
//! ```
//!
//! Only the row counter, the column count of the first row and the shape of
//! the most recently emitted row survive from one row to the next.

mod executor;
mod reader;

pub use executor::{Executor, PipelineState};
pub use reader::RowReader;

use std::io::{BufRead, Write};

use crate::command::CommandList;
use crate::error::Result;
use crate::row::{check_column_count, unify, validate, DelimiterSet, Limits, Row};

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_deleted: usize,
    pub rows_inserted: usize,
}

/// Everything needed to process one stream
#[derive(Debug, Clone)]
pub struct Pipeline {
    commands: CommandList,
    delimiters: DelimiterSet,
    limits: Limits,
    expected_columns: Option<usize>,
    output_columns: Option<usize>,
    summary: RunSummary,
}

impl Pipeline {
    pub fn new(commands: CommandList, delimiters: DelimiterSet, limits: Limits) -> Self {
        Self {
            commands,
            delimiters,
            limits,
            expected_columns: None,
            output_columns: None,
            summary: RunSummary::default(),
        }
    }

    /// Process every row of `input`, writing results to `output`
    ///
    /// Output is flushed even when a row fails, so every row completed before
    /// the failure reaches the writer.
    pub fn run<R: BufRead, W: Write>(mut self, input: R, output: &mut W) -> Result<RunSummary> {
        tracing::info!(
            commands = self.commands.len(),
            max_row_size = self.limits.max_row_size,
            max_cell_size = self.limits.max_cell_size,
            "starting run"
        );
        let result = self.stream(input, output);
        let flushed = output.flush();
        result?;
        flushed?;
        tracing::info!(summary = ?self.summary, "run finished");
        Ok(self.summary)
    }

    fn stream<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        // Limits fields are public; re-check before allocating the buffers
        let limits = Limits::new(self.limits.max_row_size, self.limits.max_cell_size)?;
        let mut reader = RowReader::new(input, limits.max_row_size)?;
        let mut row = Row::new(limits, self.delimiters.canonical());

        while reader.next_into(&mut row)? {
            self.summary.rows_read = reader.rows_read();
            self.process_row(&mut row, output)?;
        }
        self.finish(output)
    }

    /// Run one loaded row through the pipeline and emit its output
    ///
    /// Nothing is written for a row that fails.
    pub fn process_row<W: Write>(&mut self, row: &mut Row, output: &mut W) -> Result<()> {
        unify(row, &self.delimiters);
        validate(row)?;
        let expected = *self.expected_columns.get_or_insert(row.column_count());
        check_column_count(row, expected)?;

        let state = Executor::new(&self.commands).process(row)?;

        let columns = if row.is_deleted() {
            self.output_columns.unwrap_or_else(|| row.column_count())
        } else {
            row.column_count()
        };
        for _ in 0..state.inserted_before {
            self.write_empty_row(output, columns)?;
        }

        if row.is_deleted() {
            self.summary.rows_deleted += 1;
        } else {
            output.write_all(row.as_bytes())?;
            self.output_columns = Some(columns);
            self.summary.rows_written += 1;
        }
        Ok(())
    }

    /// Emit the rows requested by `arow`
    pub fn finish<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let columns = self
            .output_columns
            .or(self.expected_columns)
            .unwrap_or(1);
        for _ in 0..self.commands.appended_rows() {
            self.write_empty_row(output, columns)?;
        }
        Ok(())
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    fn write_empty_row<W: Write>(&mut self, output: &mut W, columns: usize) -> Result<()> {
        let delimiter = self.delimiters.canonical();
        let mut line = vec![delimiter; columns.saturating_sub(1)];
        line.push(b'\n');
        output.write_all(&line)?;
        self.summary.rows_inserted += 1;
        Ok(())
    }
}
