//! sheet - streaming table editor
//!
//! Reads delimiter-separated rows one at a time, applies an ordered list of
//! table-editing and data-processing commands to each, and writes the result.
//!
//! ```
//! use sheet::{parse_commands, DelimiterSet, Limits, Pipeline};
//!
//! let delimiters = DelimiterSet::new(":").unwrap();
//! let commands = parse_commands(&["toupper", "2"][..], &delimiters).unwrap();
//! let mut output = Vec::new();
//! Pipeline::new(commands, delimiters, Limits::default())
//!     .run(&b"a:b:c\n"[..], &mut output)
//!     .unwrap();
//! assert_eq!(output, b"a:B:c\n");
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod ops;
pub mod pipeline;
pub mod row;
pub mod selection;
pub mod tracing;

// Re-export commonly used types
pub use command::{parse_commands, CommandList, Descriptor, Operation, Selection};
pub use config::SheetConfig;
pub use error::SheetError;
pub use pipeline::{Pipeline, RunSummary};
pub use row::{DelimiterSet, Limits, Row};
