//! Row operations
//!
//! - `table`: commands that change the table shape, run first
//! - `data`: commands that change cell content, run after the table pass

pub mod data;
pub mod table;

mod number;

pub use data::apply_data;
pub use table::{apply_table, TableOutcome};
