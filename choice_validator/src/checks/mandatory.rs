//! Checkers for the always-required fields: attribute count, level vector
//! and option-set size.

use super::error::FieldProblem;
use crate::classify::{read_integer, IntegerToken};
use crate::config::compile_time::design::*;
use crate::fields::FieldId;

/// Shared shape of the two count fields: one integer inside `min..=max`.
/// The range test only runs on a value that parsed.
fn check_count(field: FieldId, text: &str, min: i64, max: i64) -> Result<usize, FieldProblem> {
    match read_integer(text) {
        IntegerToken::NotInteger => Err(FieldProblem::NotAnInteger {
            field,
            value: text.to_string(),
        }),
        // build.rs keeps every lower bound at 2 or more, so the cast is lossless
        IntegerToken::Value(value) if (min..=max).contains(&value) => Ok(value as usize),
        IntegerToken::Value(_) | IntegerToken::Oversized => Err(FieldProblem::OutOfRange {
            field,
            value: text.to_string(),
            min,
            max,
        }),
    }
}

pub fn check_factors(text: &str) -> Result<usize, FieldProblem> {
    check_count(FieldId::Factors, text, MIN_FACTORS, MAX_FACTORS)
}

pub fn check_option_set_size(text: &str) -> Result<usize, FieldProblem> {
    check_count(
        FieldId::OptionSetSize,
        text,
        MIN_OPTION_SET_SIZE,
        MAX_OPTION_SET_SIZE,
    )
}

/// Check the level vector against an already-accepted attribute count.
///
/// A length mismatch is reported once and nothing else is examined. With the
/// right length every token is checked, and each bad token is reported.
pub fn check_levels(text: &str, factor_count: usize) -> Result<Vec<i64>, Vec<FieldProblem>> {
    let field = FieldId::Levels;

    if text.trim().is_empty() {
        return Err(vec![FieldProblem::FieldEmpty { field }]);
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() > factor_count {
        return Err(vec![FieldProblem::TooManyValues {
            field,
            expected: factor_count,
            found: tokens.len(),
        }]);
    }
    if tokens.len() < factor_count {
        return Err(vec![FieldProblem::TooFewValues {
            field,
            expected: factor_count,
            found: tokens.len(),
        }]);
    }

    let mut levels = Vec::with_capacity(tokens.len());
    let mut problems = Vec::new();

    for token in tokens {
        match read_integer(token) {
            IntegerToken::NotInteger => problems.push(FieldProblem::NonIntegerValue {
                field,
                value: token.to_string(),
            }),
            IntegerToken::Value(level) if (MIN_LEVELS..=MAX_LEVELS).contains(&level) => {
                levels.push(level)
            }
            IntegerToken::Value(_) | IntegerToken::Oversized => {
                problems.push(FieldProblem::ValueOutOfRange {
                    field,
                    value: token.to_string(),
                })
            }
        }
    }

    if problems.is_empty() {
        Ok(levels)
    } else {
        Err(problems)
    }
}
