// Internal modules
pub mod checks;
pub mod classify;
pub mod config;
pub mod design;
pub mod fields;
#[macro_use]
pub mod logging;
pub mod mode;
pub mod screening;
pub mod submission;
pub mod utils;
pub mod validation;

// Re-export key types for library consumers
pub use checks::{FieldProblem, ProblemKind};
pub use design::{ConversionError, DesignInputs};
pub use fields::{FieldId, RawFields};
pub use mode::{expected_io, resolve_required_fields, EffectMode, ExpectedIo, Mode, ModeError, Operation};
pub use screening::{screen_submission, ScreenError};
pub use submission::{load_submission, write_input_files, Submission, SubmissionError};
pub use validation::{validate, validate_with_preferences, FieldStatus, ValidationReport, Verdict};
