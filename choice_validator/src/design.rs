//! Typed design inputs
//!
//! Converts the text of an accepted submission into the values the
//! processing back end works with. Only the fields the mode expects are
//! converted; the rest stay `None`.

use crate::classify::numeric_value;
use crate::fields::{FieldId, RawFields};
use crate::log_success;
use crate::logging::codes::{self, Code};
use crate::mode::{resolve_required_fields, Mode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Cannot convert {field}: '{token}' is not an integer")]
    NotInteger { field: FieldId, token: String },

    #[error("Cannot convert {field}: expected exactly one value")]
    NotScalar { field: FieldId },

    #[error("Cannot convert {field}: '{pair}' is not an i,j pair of attribute numbers")]
    BadPair { field: FieldId, pair: String },
}

impl ConversionError {
    pub fn field(&self) -> FieldId {
        match self {
            Self::NotInteger { field, .. }
            | Self::NotScalar { field }
            | Self::BadPair { field, .. } => *field,
        }
    }

    pub fn error_code(&self) -> Code {
        codes::conversion::CONVERSION_FAILED
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignInputs {
    pub factor_count: usize,
    pub levels: Vec<i64>,
    pub option_set_size: usize,
    pub choice_sets: Option<Vec<Vec<i64>>>,
    pub treatments: Option<Vec<Vec<i64>>>,
    pub generators: Option<Vec<Vec<i64>>>,
    /// `None` when blank, unreadable or outside [0, 1]
    pub determinant: Option<f64>,
    pub two_factor_interactions: Option<Vec<(u32, u32)>>,
}

impl DesignInputs {
    /// Convert validated field text. Text is normalized first, the same way
    /// the orchestrator sees it.
    pub fn from_fields(fields: &RawFields, mode: Mode) -> Result<Self, ConversionError> {
        let fields = fields.normalized();
        let required = resolve_required_fields(mode);
        let matrix = |field: FieldId| -> Result<Option<Vec<Vec<i64>>>, ConversionError> {
            if required.contains(field) {
                parse_matrix(field, fields.get(field)).map(Some)
            } else {
                Ok(None)
            }
        };

        let inputs = DesignInputs {
            factor_count: parse_count(FieldId::Factors, &fields.factors)?,
            levels: parse_row(FieldId::Levels, &fields.levels)?,
            option_set_size: parse_count(FieldId::OptionSetSize, &fields.msize)?,
            choice_sets: matrix(FieldId::ChoiceSets)?,
            treatments: matrix(FieldId::Treatments)?,
            generators: matrix(FieldId::Generators)?,
            determinant: if required.contains(FieldId::Determinant) {
                parse_determinant(&fields.det)
            } else {
                None
            },
            two_factor_interactions: if required.contains(FieldId::TwoFactorInteractions) {
                Some(parse_pairs(&fields.twofis)?)
            } else {
                None
            },
        };

        log_success!(codes::success::CONVERSION_COMPLETE, "Design inputs converted",
            "mode" => mode,
            "factors" => inputs.factor_count
        );

        Ok(inputs)
    }
}

fn parse_integer(field: FieldId, token: &str) -> Result<i64, ConversionError> {
    token.parse().map_err(|_| ConversionError::NotInteger {
        field,
        token: token.to_string(),
    })
}

fn parse_row(field: FieldId, text: &str) -> Result<Vec<i64>, ConversionError> {
    text.split_whitespace()
        .map(|token| parse_integer(field, token))
        .collect()
}

fn parse_count(field: FieldId, text: &str) -> Result<usize, ConversionError> {
    if text.split_whitespace().count() != 1 {
        return Err(ConversionError::NotScalar { field });
    }
    let value = parse_integer(field, text.trim())?;
    usize::try_from(value).map_err(|_| ConversionError::NotInteger {
        field,
        token: text.to_string(),
    })
}

/// Rows of the matrix; blank lines are dropped
fn parse_matrix(field: FieldId, text: &str) -> Result<Vec<Vec<i64>>, ConversionError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_row(field, line))
        .collect()
}

fn parse_determinant(text: &str) -> Option<f64> {
    numeric_value(text).filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
}

fn parse_pairs(text: &str) -> Result<Vec<(u32, u32)>, ConversionError> {
    let field = FieldId::TwoFactorInteractions;
    text.split_whitespace()
        .map(|pair| {
            let bad_pair = || ConversionError::BadPair {
                field,
                pair: pair.to_string(),
            };
            let (first, second) = pair.split_once(',').ok_or_else(bad_pair)?;
            let first: u32 = first.trim().parse().map_err(|_| bad_pair())?;
            let second: u32 = second.trim().parse().map_err(|_| bad_pair())?;
            Ok((first, second))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{EffectMode, Operation};
    use assert_matches::assert_matches;

    fn base() -> RawFields {
        RawFields::default()
            .with(FieldId::Factors, "3")
            .with(FieldId::Levels, "2 3 2")
            .with(FieldId::OptionSetSize, "2")
            .with(FieldId::ChoiceSets, "0 1 0 1 2 1\n\n1 0 1 0 0 0\n")
            .with(FieldId::Treatments, "0 0 0\n1 2 1")
            .with(FieldId::Generators, "1 1 1")
            .with(FieldId::Determinant, "1/4")
            .with(FieldId::TwoFactorInteractions, "1,2 2,3")
    }

    #[test]
    fn test_check_mode_inputs() {
        let inputs =
            DesignInputs::from_fields(&base(), Mode::new(Operation::Check, EffectMode::Main))
                .unwrap();

        assert_eq!(inputs.factor_count, 3);
        assert_eq!(inputs.levels, vec![2, 3, 2]);
        assert_eq!(
            inputs.choice_sets,
            Some(vec![vec![0, 1, 0, 1, 2, 1], vec![1, 0, 1, 0, 0, 0]])
        );
        assert_eq!(inputs.treatments, None);
        assert_eq!(inputs.determinant, None);
        assert_eq!(inputs.two_factor_interactions, None);
    }

    #[test]
    fn test_construct_some_inputs() {
        let inputs = DesignInputs::from_fields(
            &base(),
            Mode::new(Operation::Construct, EffectMode::MainPlusSome),
        )
        .unwrap();

        assert_eq!(inputs.choice_sets, None);
        assert_eq!(inputs.treatments, Some(vec![vec![0, 0, 0], vec![1, 2, 1]]));
        assert_eq!(inputs.generators, Some(vec![vec![1, 1, 1]]));
        assert_eq!(inputs.determinant, Some(0.25));
        assert_eq!(inputs.two_factor_interactions, Some(vec![(1, 2), (2, 3)]));
    }

    #[test]
    fn test_determinant_dropped_when_unusable() {
        let mode = Mode::new(Operation::Check, EffectMode::MainPlusAll);
        for det in ["", "2", "abc", "1/0"] {
            let fields = base().with(FieldId::Determinant, det);
            let inputs = DesignInputs::from_fields(&fields, mode).unwrap();
            assert_eq!(inputs.determinant, None, "{}", det);
        }
    }

    #[test]
    fn test_conversion_errors_name_the_field() {
        let fields = base().with(FieldId::Treatments, "0 0 0\n1 x 1");
        let error = DesignInputs::from_fields(
            &fields,
            Mode::new(Operation::Construct, EffectMode::Main),
        )
        .unwrap_err();
        assert_eq!(error.field(), FieldId::Treatments);
        assert_eq!(error.error_code(), codes::conversion::CONVERSION_FAILED);

        let fields = base().with(FieldId::OptionSetSize, "2 2");
        assert_matches!(
            DesignInputs::from_fields(&fields, Mode::new(Operation::Check, EffectMode::Main)),
            Err(ConversionError::NotScalar { field: FieldId::OptionSetSize })
        );

        let fields = base().with(FieldId::TwoFactorInteractions, "1,2 3");
        assert_matches!(
            DesignInputs::from_fields(
                &fields,
                Mode::new(Operation::Check, EffectMode::MainPlusSome)
            ),
            Err(ConversionError::BadPair { pair, .. }) if pair == "3"
        );
    }
}
