//! Two-factor interaction list checker

use super::error::FieldProblem;
use crate::classify::is_integer;
use crate::fields::FieldId;

/// Pairs are `i,j` tokens separated by whitespace. Only the first malformed
/// pair is reported; checking stops there.
pub fn check_two_factor_interactions(text: &str) -> Vec<FieldProblem> {
    let field = FieldId::TwoFactorInteractions;

    if text.trim().is_empty() {
        return vec![FieldProblem::NoValidPairs { field }];
    }

    for pair in text.split_whitespace() {
        let values: Vec<&str> = pair.split(',').collect();
        if values.len() != 2 {
            return vec![FieldProblem::PairFormat {
                field,
                pair: pair.to_string(),
            }];
        }

        if let Some(bad) = values.iter().find(|value| !is_integer(value)) {
            let problem = if bad.is_empty() {
                FieldProblem::PairMissingValue {
                    field,
                    pair: pair.to_string(),
                }
            } else {
                FieldProblem::PairNotInteger {
                    field,
                    value: bad.to_string(),
                }
            };
            return vec![problem];
        }
    }

    Vec::new()
}
