//! Server-side submission screen
//!
//! A coarse first-failure check on raw field text, for submissions that
//! bypass the interactive form. It is independent of the orchestrator and
//! stops at the first problem it finds.

use crate::fields::RawFields;
use crate::logging::codes::{self, Code};
use crate::{log_error, log_success};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub const SCREEN_PREFIX: &str = "Your input data did not pass validation.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("Your input data did not pass validation. Problem with radio buttons. Not either check or construct.")]
    Operation { selection: String },

    #[error("Your input data did not pass validation. Problem with effects selected. Not either main or mplusall or mplussome.")]
    Effect { selection: String },

    #[error("Your input data did not pass validation. Problem with determinant, not integer or fraction or exponent or blank.")]
    Determinant { value: String },

    #[error("Your input data did not pass validation. Problem with factors, not an integer.")]
    Factors { value: String },

    #[error("Your input data did not pass validation. Problem with two-factor interactions, some items are < 1.")]
    InteractionBelowOne { item: String },

    #[error("Your input data did not pass validation. Problem with two-factor interactions, some items are > k.")]
    InteractionAboveFactors { item: String, factors: i64 },

    #[error("Your input data did not pass validation. Problem with two-factor interactions, some items are not positive integers.")]
    InteractionNotInteger { item: String },

    #[error("Your input data did not pass validation. Problem something is not an integer in one of factors, levels, msize, chsets, tmts or gens.")]
    NotInteger { field: &'static str, token: String },
}

impl ScreenError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Operation { .. } => codes::mode::UNKNOWN_OPERATION,
            Self::Effect { .. } => codes::mode::UNKNOWN_EFFECT,
            _ => codes::screening::SUBMISSION_REJECTED,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Operation { .. } => "Operation",
            Self::Effect { .. } => "Effect",
            Self::Determinant { .. } => "Determinant",
            Self::Factors { .. } => "Factors",
            Self::InteractionBelowOne { .. } => "InteractionBelowOne",
            Self::InteractionAboveFactors { .. } => "InteractionAboveFactors",
            Self::InteractionNotInteger { .. } => "InteractionNotInteger",
            Self::NotInteger { .. } => "NotInteger",
        }
    }
}

static PAIR_SEPARATOR: OnceLock<Regex> = OnceLock::new();

fn pair_separator() -> &'static Regex {
    PAIR_SEPARATOR.get_or_init(|| {
        Regex::new(r"[\s,]+").unwrap_or_else(|e| panic!("bad separator pattern: {e}"))
    })
}

/// Accepts what a float parser would, plus `a/b` of two floats, plus blank
fn is_acceptable_determinant(text: &str) -> bool {
    if text.trim().is_empty() || text.trim().parse::<f64>().is_ok() {
        return true;
    }
    match text.split_once('/') {
        Some((numerator, denominator)) => {
            !denominator.contains('/')
                && numerator.trim().parse::<f64>().is_ok()
                && denominator.trim().parse::<f64>().is_ok()
        }
        None => false,
    }
}

/// Screen a submission. Selections are taken as raw text so that unknown
/// values are reported here rather than rejected by the caller's parser.
pub fn screen_submission(
    fields: &RawFields,
    operation: &str,
    effect: &str,
) -> Result<(), ScreenError> {
    let result = screen(fields, operation, effect);
    match &result {
        Ok(()) => {
            log_success!(codes::success::SCREENING_PASSED, "Submission passed screening");
        }
        Err(error) => {
            log_error!(error.error_code(), &error.to_string(),
                "error_type" => error.error_type()
            );
        }
    }
    result
}

fn screen(fields: &RawFields, operation: &str, effect: &str) -> Result<(), ScreenError> {
    if !matches!(operation, "check" | "construct") {
        return Err(ScreenError::Operation {
            selection: operation.to_string(),
        });
    }

    if !matches!(effect, "main" | "mplusall" | "mplussome") {
        return Err(ScreenError::Effect {
            selection: effect.to_string(),
        });
    }

    if !fields.det.is_empty() && !is_acceptable_determinant(&fields.det) {
        return Err(ScreenError::Determinant {
            value: fields.det.clone(),
        });
    }

    let factors = if fields.factors.is_empty() {
        None
    } else {
        Some(
            fields
                .factors
                .trim()
                .parse::<i64>()
                .map_err(|_| ScreenError::Factors {
                    value: fields.factors.clone(),
                })?,
        )
    };

    if !fields.twofis.is_empty() {
        screen_interactions(&fields.twofis, factors)?;
    }

    let integer_fields = [
        ("levels", &fields.levels),
        ("msize", &fields.msize),
        ("chsets", &fields.chsets),
        ("tmts", &fields.tmts),
        ("gens", &fields.gens),
    ];
    for (field, text) in integer_fields {
        if let Some(token) = text
            .split_whitespace()
            .find(|token| token.parse::<i64>().is_err())
        {
            return Err(ScreenError::NotInteger {
                field,
                token: token.to_string(),
            });
        }
    }

    Ok(())
}

/// Without a known attribute count only the lower bound can be enforced
fn screen_interactions(text: &str, factors: Option<i64>) -> Result<(), ScreenError> {
    for item in pair_separator().split(text.trim()) {
        let value: i64 = item
            .parse()
            .map_err(|_| ScreenError::InteractionNotInteger {
                item: item.to_string(),
            })?;
        if value < 1 {
            return Err(ScreenError::InteractionBelowOne {
                item: item.to_string(),
            });
        }
        if let Some(factors) = factors {
            if value > factors {
                return Err(ScreenError::InteractionAboveFactors {
                    item: item.to_string(),
                    factors,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldId;
    use assert_matches::assert_matches;

    fn fields() -> RawFields {
        RawFields::default()
            .with(FieldId::Factors, "4")
            .with(FieldId::Levels, "4 3 3 3")
            .with(FieldId::OptionSetSize, "2")
            .with(FieldId::Treatments, "0 0 0 0\n1 1 1 1")
            .with(FieldId::Generators, "1 1 1 1")
    }

    #[test]
    fn test_clean_submission_passes() {
        assert_eq!(screen_submission(&fields(), "construct", "main"), Ok(()));
    }

    #[test]
    fn test_selection_order() {
        assert_matches!(
            screen_submission(&fields(), "build", "nonsense"),
            Err(ScreenError::Operation { .. })
        );
        assert_matches!(
            screen_submission(&fields(), "check", "mplus2"),
            Err(ScreenError::Effect { .. })
        );
    }

    #[test]
    fn test_determinant_forms() {
        for det in ["0", "1", "0.123", "17/12524124635136", "1.35738e-12", " "] {
            let f = fields().with(FieldId::Determinant, det);
            assert_eq!(screen_submission(&f, "check", "mplusall"), Ok(()), "{}", det);
        }

        let f = fields().with(FieldId::Determinant, "1/2/3");
        assert_matches!(
            screen_submission(&f, "check", "mplusall"),
            Err(ScreenError::Determinant { .. })
        );
    }

    #[test]
    fn test_factors_must_be_integer() {
        let f = fields().with(FieldId::Factors, "four");
        assert_matches!(
            screen_submission(&f, "check", "main"),
            Err(ScreenError::Factors { .. })
        );
    }

    #[test]
    fn test_interaction_items() {
        let ok = fields().with(FieldId::TwoFactorInteractions, "1,2 3,4, 1 , 3");
        assert_eq!(screen_submission(&ok, "construct", "mplussome"), Ok(()));

        let low = fields().with(FieldId::TwoFactorInteractions, "0,2");
        assert_matches!(
            screen_submission(&low, "construct", "mplussome"),
            Err(ScreenError::InteractionBelowOne { .. })
        );

        let high = fields().with(FieldId::TwoFactorInteractions, "1,5");
        assert_matches!(
            screen_submission(&high, "construct", "mplussome"),
            Err(ScreenError::InteractionAboveFactors { factors: 4, .. })
        );

        let bad = fields().with(FieldId::TwoFactorInteractions, "1,b");
        assert_matches!(
            screen_submission(&bad, "construct", "mplussome"),
            Err(ScreenError::InteractionNotInteger { item }) if item == "b"
        );
    }

    #[test]
    fn test_first_non_integer_token() {
        let f = fields().with(FieldId::Generators, "1 1 q 1");
        let error = screen_submission(&f, "construct", "main").unwrap_err();
        assert_matches!(&error, ScreenError::NotInteger { field: "gens", token } if token == "q");
        assert!(error.to_string().starts_with(SCREEN_PREFIX));
    }
}
