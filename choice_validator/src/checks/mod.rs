//! Field checkers
//!
//! One checker per field. Each takes normalized field text plus whatever
//! validated context it depends on, and reports problems as values. No
//! checker fails on malformed input; malformed input is what they describe.

pub mod determinant;
pub mod error;
pub mod interactions;
pub mod mandatory;
pub mod matrix;
pub mod types;

pub use determinant::check_determinant;
pub use error::{FieldProblem, ProblemKind};
pub use interactions::check_two_factor_interactions;
pub use mandatory::{check_factors, check_levels, check_option_set_size};
pub use matrix::{check_choice_sets, check_generators, check_matrix, check_treatments};
pub use types::{DesignSpec, MatrixShape};

use crate::fields::{FieldId, RawFields};

/// Run the checker for one mode-selected field. Mandatory fields are handled
/// by the orchestrator's gate and yield nothing here.
pub fn check_optional_field(
    field: FieldId,
    fields: &RawFields,
    spec: &DesignSpec,
) -> Vec<FieldProblem> {
    let text = fields.get(field);
    match field {
        FieldId::ChoiceSets => check_choice_sets(text, spec),
        FieldId::Treatments => check_treatments(text, spec),
        FieldId::Generators => check_generators(text, spec),
        FieldId::Determinant => check_determinant(text),
        FieldId::TwoFactorInteractions => check_two_factor_interactions(text),
        FieldId::Factors | FieldId::Levels | FieldId::OptionSetSize => Vec::new(),
    }
}
