//! Validated design context handed to the mode-selected checkers

use crate::fields::FieldId;

/// Attribute count, level vector and option-set size, all already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignSpec {
    pub factor_count: usize,
    pub levels: Vec<i64>,
    pub option_set_size: usize,
}

impl DesignSpec {
    pub fn new(factor_count: usize, levels: Vec<i64>, option_set_size: usize) -> Self {
        Self {
            factor_count,
            levels,
            option_set_size,
        }
    }

    /// One row per choice set: every option's attributes side by side
    pub fn choice_set_shape(&self) -> MatrixShape {
        MatrixShape::tiled(FieldId::ChoiceSets, &self.levels, self.option_set_size)
    }

    /// One treatment combination per row
    pub fn treatment_shape(&self) -> MatrixShape {
        MatrixShape::tiled(FieldId::Treatments, &self.levels, 1)
    }

    /// One generator set per row, covering every option but the first
    pub fn generator_shape(&self) -> MatrixShape {
        MatrixShape::tiled(
            FieldId::Generators,
            &self.levels,
            self.option_set_size.saturating_sub(1),
        )
        .forbidding_all_zero_rows()
    }
}

/// Expected layout of a matrix field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixShape {
    pub field: FieldId,
    /// Exclusive upper bound per column; its length is the row width
    pub ranges: Vec<i64>,
    pub forbid_all_zero_rows: bool,
}

impl MatrixShape {
    /// Level vector repeated `times` times
    pub fn tiled(field: FieldId, levels: &[i64], times: usize) -> Self {
        Self {
            field,
            ranges: levels.repeat(times),
            forbid_all_zero_rows: false,
        }
    }

    pub fn forbidding_all_zero_rows(mut self) -> Self {
        self.forbid_all_zero_rows = true;
        self
    }

    pub fn width(&self) -> usize {
        self.ranges.len()
    }
}
