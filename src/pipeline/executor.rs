//! Per-row execution of a command list
//!
//! ```text
//! ShapePass ─▶ (deleted? stop) ─▶ SelectionCheck ─▶ ContentPass ─▶ rule checks
//! ```

use crate::command::CommandList;
use crate::error::{Result, SheetError};
use crate::ops::{apply_data, apply_table, TableOutcome};
use crate::row::Row;
use crate::selection;

/// Bookkeeping for one row's pass, discarded afterwards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// A table command changed or deleted this row, or inserted a row before it
    pub table_changed: bool,
    /// Data commands that took effect on this row
    pub data_changes: usize,
    /// Empty rows to emit before this row
    pub inserted_before: usize,
}

/// Applies a parsed command list to rows
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    commands: &'a CommandList,
}

impl<'a> Executor<'a> {
    pub fn new(commands: &'a CommandList) -> Self {
        Self { commands }
    }

    /// Run every command against `row`
    ///
    /// Table commands run first, in argument order. Data commands run only
    /// if the row survived, each gated by its selection.
    pub fn process(&self, row: &mut Row) -> Result<PipelineState> {
        let mut state = PipelineState::default();

        for descriptor in self.commands.table_ops() {
            match apply_table(&descriptor.operation, row)? {
                TableOutcome::Unchanged => {}
                TableOutcome::Modified => state.table_changed = true,
                TableOutcome::InsertRowBefore => {
                    state.table_changed = true;
                    state.inserted_before += 1;
                }
            }
        }

        if !row.is_deleted() {
            for descriptor in self.commands.data_ops() {
                if !selection::accepts(descriptor.selection.as_ref(), row)? {
                    continue;
                }
                if apply_data(&descriptor.operation, row)? {
                    state.data_changes += 1;
                    if state.data_changes > 1 {
                        break;
                    }
                }
            }
        }

        if state.table_changed && state.data_changes > 0 {
            return Err(SheetError::ConflictingOperations { row: row.number() });
        }
        if state.data_changes > 1 {
            return Err(SheetError::MultipleDataOperations { row: row.number() });
        }

        tracing::debug!(
            row = row.number(),
            deleted = row.is_deleted(),
            table_changed = state.table_changed,
            data_changes = state.data_changes,
            "row processed"
        );
        Ok(state)
    }
}
