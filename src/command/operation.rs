//! Typed operation descriptors
//!
//! Every command from the argument list becomes one `Descriptor`: an
//! `Operation` plus the optional `Selection` that gates it. Descriptors are
//! built once before the first row and never change afterwards.

/// Which pass of the pipeline an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// Changes the table shape (rows or columns); never gated by a selection
    Table,
    /// Changes cell content; gated by an optional selection
    Data,
}

/// Reduction applied by the column aggregate commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Sum,
    Average,
    Min,
    Max,
    Count,
}

/// All commands the pipeline can execute
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    // ========================================================================
    // Table editing
    // ========================================================================
    /// `irow R` - emit an empty row before row R
    InsertRow(usize),
    /// `arow` - emit an empty row after the last row
    AppendRow,
    /// `drow R` / `drows N M` - delete rows N..=M
    DeleteRows { from: usize, to: usize },
    /// `icol C` - insert an empty column before column C
    InsertColumn(usize),
    /// `acol` - append an empty column
    AppendColumn,
    /// `dcol C` / `dcols N M` - delete columns N..=M
    DeleteColumns { from: usize, to: usize },

    // ========================================================================
    // Data processing
    // ========================================================================
    /// `cset C STR`
    SetCell { column: usize, value: String },
    /// `tolower C`
    Lowercase(usize),
    /// `toupper C`
    Uppercase(usize),
    /// `round C`
    Round(usize),
    /// `int C`
    Truncate(usize),
    /// `copy N M` - overwrite column M with column N
    Copy { from: usize, to: usize },
    /// `swap N M`
    Swap { first: usize, second: usize },
    /// `move N M` - move column N before column M
    Move { column: usize, before: usize },
    /// `csum`, `cavg`, `cmin`, `cmax`, `ccount` - `C N M`
    Aggregate {
        kind: AggregateKind,
        target: usize,
        from: usize,
        to: usize,
    },
    /// `cseq N M B` - write B, B+1, ... into columns N..=M
    Sequence { from: usize, to: usize, start: f64 },
}

impl Operation {
    pub fn class(&self) -> OperationClass {
        match self {
            Self::InsertRow(_)
            | Self::AppendRow
            | Self::DeleteRows { .. }
            | Self::InsertColumn(_)
            | Self::AppendColumn
            | Self::DeleteColumns { .. } => OperationClass::Table,
            _ => OperationClass::Data,
        }
    }

    /// Command name as written on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertRow(_) => "irow",
            Self::AppendRow => "arow",
            Self::DeleteRows { from, to } if from == to => "drow",
            Self::DeleteRows { .. } => "drows",
            Self::InsertColumn(_) => "icol",
            Self::AppendColumn => "acol",
            Self::DeleteColumns { from, to } if from == to => "dcol",
            Self::DeleteColumns { .. } => "dcols",
            Self::SetCell { .. } => "cset",
            Self::Lowercase(_) => "tolower",
            Self::Uppercase(_) => "toupper",
            Self::Round(_) => "round",
            Self::Truncate(_) => "int",
            Self::Copy { .. } => "copy",
            Self::Swap { .. } => "swap",
            Self::Move { .. } => "move",
            Self::Aggregate { kind, .. } => match kind {
                AggregateKind::Sum => "csum",
                AggregateKind::Average => "cavg",
                AggregateKind::Min => "cmin",
                AggregateKind::Max => "cmax",
                AggregateKind::Count => "ccount",
            },
            Self::Sequence { .. } => "cseq",
        }
    }
}

/// Rows accepted by a `rows` selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRange {
    /// `rows N M`
    Between { from: usize, to: usize },
    /// `rows N -`
    From(usize),
    /// `rows - -`
    Last,
}

/// Predicate limiting which rows a data-processing command touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Rows(RowRange),
    BeginsWith { column: usize, text: String },
    Contains { column: usize, text: String },
    /// Several selections written back to back; all must accept
    All(Vec<Selection>),
}

impl Selection {
    /// Combine with a selection written after this one
    pub fn and(self, next: Selection) -> Selection {
        match self {
            Selection::All(mut parts) => {
                parts.push(next);
                Selection::All(parts)
            }
            first => Selection::All(vec![first, next]),
        }
    }
}

/// One parsed command with its optional selection
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub operation: Operation,
    pub selection: Option<Selection>,
}

impl Descriptor {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            selection: None,
        }
    }

    /// Attach a selection
    pub fn when(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn class(&self) -> OperationClass {
        self.operation.class()
    }
}

/// Immutable, ordered list of descriptors for a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    descriptors: Vec<Descriptor>,
}

impl CommandList {
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Table-editing descriptors in argument order
    pub fn table_ops(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.class() == OperationClass::Table)
    }

    /// Data-processing descriptors in argument order
    pub fn data_ops(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors
            .iter()
            .filter(|d| d.class() == OperationClass::Data)
    }

    /// Number of `arow` commands
    pub fn appended_rows(&self) -> usize {
        self.descriptors
            .iter()
            .filter(|d| d.operation == Operation::AppendRow)
            .count()
    }
}
