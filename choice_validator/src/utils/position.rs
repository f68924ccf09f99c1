//! Cell location tracking for matrix fields
//!
//! Matrix problems are reported against a 1-based (row, column) pair. Rows
//! count every line of the field text, blank lines included, so the number a
//! user sees matches the line they typed.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell in a matrix field, 1-based in both directions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellPosition {
    /// Line number within the field (1-based)
    pub row: usize,
    /// Token number within the line (1-based)
    pub column: usize,
}

impl CellPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Position of the first cell on a row
    pub fn row_start(row: usize) -> Self {
        Self { row, column: 1 }
    }

    /// Same row, next column
    pub fn next_column(self) -> Self {
        Self {
            row: self.row,
            column: self.column + 1,
        }
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}
