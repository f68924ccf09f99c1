//! Determinant checker

use super::error::FieldProblem;
use crate::classify::numeric_value;
use crate::fields::FieldId;

/// Optional field: blank text is fine. Otherwise the value must be a
/// fraction, exponent or decimal numeral lying in the closed interval [0, 1].
pub fn check_determinant(text: &str) -> Vec<FieldProblem> {
    let field = FieldId::Determinant;

    if text.trim().is_empty() {
        return Vec::new();
    }

    match numeric_value(text) {
        None => vec![FieldProblem::DeterminantFormat {
            field,
            value: text.to_string(),
        }],
        Some(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Vec::new(),
        Some(_) => vec![FieldProblem::DeterminantRange {
            field,
            value: text.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_blank_is_accepted() {
        assert!(check_determinant("").is_empty());
        assert!(check_determinant("   ").is_empty());
    }

    #[test]
    fn test_accepted_forms() {
        for text in ["0.5", "17/12524124635136", "1.35738e-12", "0", "1", "1/1", "0.0"] {
            assert!(check_determinant(text).is_empty(), "{}", text);
        }
    }

    #[test]
    fn test_format_problem() {
        let problems = check_determinant("half");
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].to_string(),
            "The 'Determinant' is not a fraction, a decimal or in exponent form."
        );
    }

    #[test]
    fn test_range_problems() {
        assert_matches!(
            check_determinant("1.5")[0],
            FieldProblem::DeterminantRange { .. }
        );
        assert_matches!(
            check_determinant("-1/4")[0],
            FieldProblem::DeterminantRange { .. }
        );
        assert_matches!(
            check_determinant("3/0")[0],
            FieldProblem::DeterminantRange { .. }
        );
        assert_matches!(
            check_determinant("2e3")[0],
            FieldProblem::DeterminantRange { .. }
        );
    }
}
