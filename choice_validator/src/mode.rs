//! Mode selection and the field sets it implies
//!
//! Two independent single-choice selections drive everything downstream:
//! what the experiment does (check supplied choice sets, or construct them)
//! and which effects it must estimate. `resolve_required_fields` maps a mode
//! to the fields the orchestrator validates; `expected_io` extends the same
//! rule to the files the processing back end reads and writes.

use crate::fields::FieldId;
use crate::logging::codes::{self, Code};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("Problem with radio buttons. Not either check or construct (got '{0}').")]
    UnknownOperation(String),

    #[error("Problem with effects selected. Not either main or mplusall or mplussome (got '{0}').")]
    UnknownEffect(String),
}

impl ModeError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnknownOperation(_) => codes::mode::UNKNOWN_OPERATION,
            Self::UnknownEffect(_) => codes::mode::UNKNOWN_EFFECT,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) => "UnknownOperation",
            Self::UnknownEffect(_) => "UnknownEffect",
        }
    }
}

/// Whether choice sets are supplied for checking or built from generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Check,
    Construct,
}

impl Operation {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Operation::Check => "check",
            Operation::Construct => "construct",
        }
    }
}

impl FromStr for Operation {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Operation::Check),
            "construct" => Ok(Operation::Construct),
            other => Err(ModeError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Which effects the design must estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectMode {
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "mplussome")]
    MainPlusSome,
    #[serde(rename = "mplusall")]
    MainPlusAll,
}

impl EffectMode {
    pub fn wire_name(&self) -> &'static str {
        match self {
            EffectMode::Main => "main",
            EffectMode::MainPlusSome => "mplussome",
            EffectMode::MainPlusAll => "mplusall",
        }
    }
}

impl FromStr for EffectMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(EffectMode::Main),
            "mplussome" => Ok(EffectMode::MainPlusSome),
            "mplusall" => Ok(EffectMode::MainPlusAll),
            other => Err(ModeError::UnknownEffect(other.to_string())),
        }
    }
}

impl fmt::Display for EffectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mode {
    pub operation: Operation,
    pub effect: EffectMode,
}

impl Mode {
    pub fn new(operation: Operation, effect: EffectMode) -> Self {
        Self { operation, effect }
    }

    /// Parse both selections from their wire names
    pub fn from_selections(operation: &str, effect: &str) -> Result<Self, ModeError> {
        Ok(Self {
            operation: operation.parse()?,
            effect: effect.parse()?,
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.operation, self.effect)
    }
}

/// Fields a mode makes mandatory, iterated in validation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFieldSet {
    fields: BTreeSet<FieldId>,
}

impl RequiredFieldSet {
    pub fn contains(&self, field: FieldId) -> bool {
        self.fields.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wire names joined with commas, for logs
    pub fn describe(&self) -> String {
        self.iter()
            .map(|f| f.wire_name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub fn resolve_required_fields(mode: Mode) -> RequiredFieldSet {
    let mut fields: BTreeSet<FieldId> = [FieldId::Factors, FieldId::Levels, FieldId::OptionSetSize]
        .into_iter()
        .collect();

    match mode.operation {
        Operation::Check => {
            fields.insert(FieldId::ChoiceSets);
        }
        Operation::Construct => {
            fields.insert(FieldId::Treatments);
            fields.insert(FieldId::Generators);
        }
    }

    match mode.effect {
        EffectMode::Main => {}
        EffectMode::MainPlusAll => {
            fields.insert(FieldId::Determinant);
        }
        EffectMode::MainPlusSome => {
            fields.insert(FieldId::Determinant);
            fields.insert(FieldId::TwoFactorInteractions);
        }
    }

    RequiredFieldSet { fields }
}

const BASE_OUTPUTS: [&str; 6] = ["bmat", "cinv", "cmat", "correln", "lmat", "msg"];

/// Files the processing back end reads (inputs) and writes (outputs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedIo {
    pub inputs: Vec<&'static str>,
    pub outputs: Vec<&'static str>,
}

pub fn expected_io(mode: Mode) -> ExpectedIo {
    let mut inputs: Vec<&'static str> = resolve_required_fields(mode)
        .iter()
        .map(|field| field.wire_name())
        .collect();
    inputs.sort_unstable();

    let mut outputs = BASE_OUTPUTS.to_vec();
    if mode.operation == Operation::Construct {
        outputs.push("chsets");
    }
    outputs.sort_unstable();

    ExpectedIo { inputs, outputs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_selections() {
        let mode = Mode::from_selections("construct", "mplussome").unwrap();
        assert_eq!(mode.operation, Operation::Construct);
        assert_eq!(mode.effect, EffectMode::MainPlusSome);
        assert_eq!(mode.to_string(), "construct/mplussome");

        assert_matches!(
            Mode::from_selections("build", "main"),
            Err(ModeError::UnknownOperation(op)) if op == "build"
        );
        assert_matches!(
            Mode::from_selections("check", "mplus2"),
            Err(ModeError::UnknownEffect(_))
        );
    }

    #[test]
    fn test_check_main_fields() {
        let set = resolve_required_fields(Mode::new(Operation::Check, EffectMode::Main));
        let fields: Vec<FieldId> = set.iter().collect();
        assert_eq!(
            fields,
            vec![
                FieldId::Factors,
                FieldId::Levels,
                FieldId::OptionSetSize,
                FieldId::ChoiceSets
            ]
        );
    }

    #[test]
    fn test_construct_some_fields() {
        let set = resolve_required_fields(Mode::new(Operation::Construct, EffectMode::MainPlusSome));
        assert!(set.contains(FieldId::Treatments));
        assert!(set.contains(FieldId::Generators));
        assert!(set.contains(FieldId::Determinant));
        assert!(set.contains(FieldId::TwoFactorInteractions));
        assert!(!set.contains(FieldId::ChoiceSets));
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_all_interactions_adds_only_determinant() {
        let set = resolve_required_fields(Mode::new(Operation::Check, EffectMode::MainPlusAll));
        assert!(set.contains(FieldId::Determinant));
        assert!(!set.contains(FieldId::TwoFactorInteractions));
        assert_eq!(set.describe(), "factors,levels,msize,chsets,det");
    }

    #[test]
    fn test_expected_io_check() {
        let io = expected_io(Mode::new(Operation::Check, EffectMode::MainPlusAll));
        assert_eq!(io.inputs, vec!["chsets", "det", "factors", "levels", "msize"]);
        assert_eq!(
            io.outputs,
            vec!["bmat", "cinv", "cmat", "correln", "lmat", "msg"]
        );
    }

    #[test]
    fn test_expected_io_construct_returns_choice_sets() {
        let io = expected_io(Mode::new(Operation::Construct, EffectMode::MainPlusSome));
        assert_eq!(
            io.inputs,
            vec!["det", "factors", "gens", "levels", "msize", "tmts", "twofis"]
        );
        assert!(io.outputs.contains(&"chsets"));
        assert_eq!(io.outputs.len(), 7);
    }
}
