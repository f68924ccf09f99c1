//! Matrix field checkers (choice sets, treatment combinations, generators)
//!
//! Rows are the non-blank lines of the field text, numbered from 1 with
//! blank lines skipped. A row of the wrong width, or any integer cell
//! outside its column's range, ends the check for the whole field: after a
//! positional error the later coordinates are not trustworthy. Non-integer
//! cells are reported one by one and scanning continues.

use super::error::FieldProblem;
use super::types::{DesignSpec, MatrixShape};
use crate::classify::{read_integer, IntegerToken};
use crate::utils::CellPosition;
use std::ops::ControlFlow;

pub fn check_choice_sets(text: &str, spec: &DesignSpec) -> Vec<FieldProblem> {
    check_matrix(text, &spec.choice_set_shape())
}

pub fn check_treatments(text: &str, spec: &DesignSpec) -> Vec<FieldProblem> {
    check_matrix(text, &spec.treatment_shape())
}

pub fn check_generators(text: &str, spec: &DesignSpec) -> Vec<FieldProblem> {
    check_matrix(text, &spec.generator_shape())
}

/// Check a matrix field against its expected shape
pub fn check_matrix(text: &str, shape: &MatrixShape) -> Vec<FieldProblem> {
    let field = shape.field;

    if text.is_empty() {
        return vec![FieldProblem::NoData { field }];
    }

    let mut problems = Vec::new();
    let mut data_rows = 0usize;

    for line in text.split('\n') {
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.is_empty() {
            continue;
        }
        data_rows += 1;

        if check_row(data_rows, &cells, shape, &mut problems).is_break() {
            return problems;
        }
    }

    if data_rows == 0 {
        problems.push(FieldProblem::OnlyBlankLines { field });
    }

    problems
}

fn check_row(
    row: usize,
    cells: &[&str],
    shape: &MatrixShape,
    problems: &mut Vec<FieldProblem>,
) -> ControlFlow<()> {
    let field = shape.field;

    if cells.len() != shape.width() {
        problems.push(FieldProblem::RowLength {
            field,
            row,
            expected: shape.width(),
            found: cells.len(),
        });
        return ControlFlow::Break(());
    }

    let mut all_zero = true;
    let mut position = CellPosition::row_start(row);

    for (cell, &limit) in cells.iter().zip(&shape.ranges) {
        match read_integer(cell) {
            IntegerToken::NotInteger => {
                all_zero = false;
                problems.push(FieldProblem::CellNotInteger {
                    field,
                    position,
                    value: cell.to_string(),
                });
            }
            IntegerToken::Value(value) if (0..limit).contains(&value) => {
                all_zero &= value == 0;
            }
            IntegerToken::Value(_) | IntegerToken::Oversized => {
                problems.push(FieldProblem::CellOutOfRange {
                    field,
                    position,
                    value: cell.to_string(),
                });
                return ControlFlow::Break(());
            }
        }
        position = position.next_column();
    }

    if shape.forbid_all_zero_rows && all_zero {
        problems.push(FieldProblem::AllZeroRow { field, row });
    }

    ControlFlow::Continue(())
}
