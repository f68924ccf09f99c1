//! Shared primitive types used across the checkers and the logging layer.

pub mod position;

pub use position::CellPosition;
