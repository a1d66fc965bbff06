//! Command descriptors and their parser
//!
//! # Architecture
//!
//! ```text
//! argv[..] → parse_commands() → CommandList (Vec<Descriptor>) → pipeline
//! ```
//!
//! Commands come in two classes. Table-editing commands (`irow`, `arow`,
//! `drow`, `drows`, `icol`, `acol`, `dcol`, `dcols`) change the table shape.
//! Data-processing commands (`cset`, `tolower`, `toupper`, `round`, `int`,
//! `copy`, `swap`, `move` and the column aggregates) change cell content and
//! may be preceded by selections (`rows`, `beginswith`, `contains`).

mod operation;
mod parser;

pub use operation::{
    AggregateKind, CommandList, Descriptor, Operation, OperationClass, RowRange, Selection,
};
pub use parser::parse_commands;
