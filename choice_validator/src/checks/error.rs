//! Problems reported by the field checkers

use crate::fields::FieldId;
use crate::logging::codes::{self, Code};
use crate::utils::CellPosition;
use serde::Serialize;
use thiserror::Error;

/// Broad class of a reported problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProblemKind {
    /// Required field empty
    Presence,
    /// Token is not the expected numeral shape
    Syntax,
    /// Row width or vector length mismatch
    Dimension,
    /// Well-formed value outside its interval
    Range,
    /// Malformed pair or forbidden row
    Structural,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::Presence => "Presence",
            ProblemKind::Syntax => "Syntax",
            ProblemKind::Dimension => "Dimension",
            ProblemKind::Range => "Range",
            ProblemKind::Structural => "Structural",
        }
    }
}

/// One problem found in one field. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldProblem {
    #[error("The {field} field is empty.")]
    FieldEmpty { field: FieldId },

    #[error("No data in {field}.")]
    NoData { field: FieldId },

    #[error("Only blank lines in {field}.")]
    OnlyBlankLines { field: FieldId },

    #[error("In {field} there are no valid pairs.")]
    NoValidPairs { field: FieldId },

    #[error("The {field} value is not an integer.")]
    NotAnInteger { field: FieldId, value: String },

    #[error("The {field} must be between {min} and {max} inclusive.")]
    OutOfRange {
        field: FieldId,
        value: String,
        min: i64,
        max: i64,
    },

    #[error("Too many values for {field}.")]
    TooManyValues {
        field: FieldId,
        expected: usize,
        found: usize,
    },

    #[error("Too few values for {field}.")]
    TooFewValues {
        field: FieldId,
        expected: usize,
        found: usize,
    },

    #[error("Non-integer data in {field}: {value}.")]
    NonIntegerValue { field: FieldId, value: String },

    #[error("Values in {field} out of range: {value}.")]
    ValueOutOfRange { field: FieldId, value: String },

    #[error("Incorrect row length in {field} row {row}.")]
    RowLength {
        field: FieldId,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("In {field} position {position} the value {value} is not an integer.")]
    CellNotInteger {
        field: FieldId,
        position: CellPosition,
        value: String,
    },

    #[error("In {field} position {position} the value {value} is invalid.")]
    CellOutOfRange {
        field: FieldId,
        position: CellPosition,
        value: String,
    },

    #[error("In {field} row {row} is all zeros which is not allowed.")]
    AllZeroRow { field: FieldId, row: usize },

    #[error("The {field} is not a fraction, a decimal or in exponent form.")]
    DeterminantFormat { field: FieldId, value: String },

    #[error("The {field} is outside range [0,1].")]
    DeterminantRange { field: FieldId, value: String },

    #[error("In {field} there is an invalid format.")]
    PairFormat { field: FieldId, pair: String },

    #[error("In {field} there is a missing value.")]
    PairMissingValue { field: FieldId, pair: String },

    #[error("In {field} {value} is not an integer.")]
    PairNotInteger { field: FieldId, value: String },
}

impl FieldProblem {
    /// The field the problem belongs to
    pub fn field(&self) -> FieldId {
        match self {
            Self::FieldEmpty { field }
            | Self::NoData { field }
            | Self::OnlyBlankLines { field }
            | Self::NoValidPairs { field }
            | Self::NotAnInteger { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::TooManyValues { field, .. }
            | Self::TooFewValues { field, .. }
            | Self::NonIntegerValue { field, .. }
            | Self::ValueOutOfRange { field, .. }
            | Self::RowLength { field, .. }
            | Self::CellNotInteger { field, .. }
            | Self::CellOutOfRange { field, .. }
            | Self::AllZeroRow { field, .. }
            | Self::DeterminantFormat { field, .. }
            | Self::DeterminantRange { field, .. }
            | Self::PairFormat { field, .. }
            | Self::PairMissingValue { field, .. }
            | Self::PairNotInteger { field, .. } => *field,
        }
    }

    pub fn kind(&self) -> ProblemKind {
        match self {
            Self::FieldEmpty { .. }
            | Self::NoData { .. }
            | Self::OnlyBlankLines { .. }
            | Self::NoValidPairs { .. } => ProblemKind::Presence,
            Self::NotAnInteger { .. }
            | Self::NonIntegerValue { .. }
            | Self::CellNotInteger { .. }
            | Self::DeterminantFormat { .. }
            | Self::PairNotInteger { .. } => ProblemKind::Syntax,
            Self::TooManyValues { .. } | Self::TooFewValues { .. } | Self::RowLength { .. } => {
                ProblemKind::Dimension
            }
            Self::OutOfRange { .. }
            | Self::ValueOutOfRange { .. }
            | Self::CellOutOfRange { .. }
            | Self::DeterminantRange { .. } => ProblemKind::Range,
            Self::AllZeroRow { .. } | Self::PairFormat { .. } | Self::PairMissingValue { .. } => {
                ProblemKind::Structural
            }
        }
    }

    /// Matrix cell the problem points at, if any
    pub fn position(&self) -> Option<CellPosition> {
        match self {
            Self::CellNotInteger { position, .. } | Self::CellOutOfRange { position, .. } => {
                Some(*position)
            }
            Self::RowLength { row, .. } | Self::AllZeroRow { row, .. } => {
                Some(CellPosition::row_start(*row))
            }
            _ => None,
        }
    }

    /// Get appropriate error code for logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::AllZeroRow { .. } => codes::structural::ALL_ZERO_GENERATOR_ROW,
            _ => match self.kind() {
                ProblemKind::Presence => codes::presence::REQUIRED_FIELD_EMPTY,
                ProblemKind::Syntax => codes::syntax::NUMERAL_SYNTAX,
                ProblemKind::Dimension => codes::dimension::DIMENSION_MISMATCH,
                ProblemKind::Range => codes::range::VALUE_OUT_OF_RANGE,
                ProblemKind::Structural => codes::structural::MALFORMED_PAIR,
            },
        }
    }

    /// Get error type for context
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::FieldEmpty { .. } => "FieldEmpty",
            Self::NoData { .. } => "NoData",
            Self::OnlyBlankLines { .. } => "OnlyBlankLines",
            Self::NoValidPairs { .. } => "NoValidPairs",
            Self::NotAnInteger { .. } => "NotAnInteger",
            Self::OutOfRange { .. } => "OutOfRange",
            Self::TooManyValues { .. } => "TooManyValues",
            Self::TooFewValues { .. } => "TooFewValues",
            Self::NonIntegerValue { .. } => "NonIntegerValue",
            Self::ValueOutOfRange { .. } => "ValueOutOfRange",
            Self::RowLength { .. } => "RowLength",
            Self::CellNotInteger { .. } => "CellNotInteger",
            Self::CellOutOfRange { .. } => "CellOutOfRange",
            Self::AllZeroRow { .. } => "AllZeroRow",
            Self::DeterminantFormat { .. } => "DeterminantFormat",
            Self::DeterminantRange { .. } => "DeterminantRange",
            Self::PairFormat { .. } => "PairFormat",
            Self::PairMissingValue { .. } => "PairMissingValue",
            Self::PairNotInteger { .. } => "PairNotInteger",
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Whether the problem stopped the checker from looking at the rest of the field
    pub fn aborts_field(&self) -> bool {
        matches!(
            self,
            Self::RowLength { .. }
                | Self::CellOutOfRange { .. }
                | Self::PairFormat { .. }
                | Self::PairMissingValue { .. }
                | Self::PairNotInteger { .. }
        )
    }
}
