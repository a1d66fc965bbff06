//! Error type shared by the row engine, the command parser and the pipeline
//!
//! Every error is fatal to the whole run. Variants carry the 1-based row
//! number where one is known so the single diagnostic line can point at it.

/// Errors produced while parsing commands or processing rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// Row (including its newline) does not fit the row buffer
    RowTooLarge { row: usize },
    /// A cell exceeds the maximum cell size
    CellTooLarge { row: usize, column: usize },
    /// Row has a different number of columns than the first row
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Column index is beyond the row's column count
    ColumnNotFound { row: usize, column: usize },
    /// Interval whose lower bound is greater than its upper bound
    InvalidInterval { from: usize, to: usize },
    /// Cell content could not be parsed as a number
    NotANumber {
        row: usize,
        column: usize,
        value: String,
    },
    /// Table-editing and data-processing both took effect on one row
    ConflictingOperations { row: usize },
    /// More than one data-processing command took effect on one row
    MultipleDataOperations { row: usize },
    /// Unknown command name, missing parameter or unparseable parameter
    MalformedArgument(String),
    /// Reading input or writing output failed
    Io(String),
    /// Configuration file exists but could not be read or parsed
    InvalidConfig { path: String, message: String },
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowTooLarge { row } => write!(f, "row {} is too large", row),
            Self::CellTooLarge { row, column } => {
                write!(f, "row {}: cell in column {} is too large", row, column)
            }
            Self::ColumnMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {}: expected {} columns, found {}",
                row, expected, found
            ),
            Self::ColumnNotFound { row, column } => {
                write!(f, "row {}: column {} does not exist", row, column)
            }
            Self::InvalidInterval { from, to } => {
                write!(f, "invalid interval {}..{}", from, to)
            }
            Self::NotANumber { row, column, value } => write!(
                f,
                "row {}: column {} is not a number: {:?}",
                row, column, value
            ),
            Self::ConflictingOperations { row } => write!(
                f,
                "row {}: table editing and data processing cannot be combined",
                row
            ),
            Self::MultipleDataOperations { row } => {
                write!(f, "row {}: more than one data command changed the row", row)
            }
            Self::MalformedArgument(msg) => write!(f, "malformed argument: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::InvalidConfig { path, message } => {
                write!(f, "invalid config file {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for SheetError {}

impl From<std::io::Error> for SheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
