//! Submission loading and input-file output
//!
//! A submission is the raw field record plus the two mode selections. It is
//! read either from a TOML file:
//!
//! ```toml
//! operation = "check"
//! effect = "main"
//!
//! [fields]
//! factors = "4"
//! levels = "4 3 3 3"
//! msize = "2"
//! chsets = """
//! 0 0 0 0 1 1 1 1
//! """
//! ```
//!
//! or from a directory holding one `in_<field>.dat` file per field, the
//! layout the processing back end consumes. Missing files read as empty.

use crate::config::compile_time::submission::{MAX_FIELD_SIZE, MAX_FILE_SIZE};
use crate::fields::{FieldId, RawFields};
use crate::logging::codes::{self, Code};
use crate::mode::{expected_io, Mode, ModeError};
use crate::{log_debug, log_error, log_success};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Submission not found: {path}")]
    NotFound { path: String },

    #[error("Not a submission file or directory: {path}")]
    InvalidPath { path: String },

    #[error("Submission too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Field {field} too large: {size} bytes (max: {max_size})")]
    FieldTooLarge {
        field: &'static str,
        size: usize,
        max_size: usize,
    },

    #[error("Malformed submission {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("No {selector} selection given")]
    MissingSelection { selector: &'static str },

    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl SubmissionError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::NotFound { .. } => codes::submission::FILE_NOT_FOUND,
            Self::InvalidPath { .. } => codes::submission::INVALID_PATH,
            Self::FileTooLarge { .. } => codes::submission::FILE_TOO_LARGE,
            Self::FieldTooLarge { .. } => codes::submission::FIELD_TOO_LARGE,
            Self::Malformed { .. } | Self::MissingSelection { .. } => {
                codes::submission::MALFORMED_SUBMISSION
            }
            Self::Mode(error) => error.error_code(),
            Self::Io { .. } => codes::submission::IO_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    fn io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound {
                path: path.display().to_string(),
            },
            _ => Self::Io {
                path: path.display().to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Raw field text plus the selections as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub fields: RawFields,
}

impl Submission {
    pub fn new(fields: RawFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Parse a TOML submission; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, SubmissionError> {
        let submission: Submission =
            toml::from_str(content).map_err(|e| SubmissionError::Malformed {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        submission.check_field_sizes()?;
        Ok(submission)
    }

    /// Replace selections with explicitly supplied ones, where given
    pub fn override_selections(&mut self, operation: Option<&str>, effect: Option<&str>) {
        if let Some(operation) = operation {
            self.operation = Some(operation.to_string());
        }
        if let Some(effect) = effect {
            self.effect = Some(effect.to_string());
        }
    }

    pub fn mode(&self) -> Result<Mode, SubmissionError> {
        let operation = self
            .operation
            .as_deref()
            .ok_or(SubmissionError::MissingSelection {
                selector: "operation",
            })?;
        let effect = self
            .effect
            .as_deref()
            .ok_or(SubmissionError::MissingSelection { selector: "effect" })?;
        Ok(Mode::from_selections(operation, effect)?)
    }

    fn check_field_sizes(&self) -> Result<(), SubmissionError> {
        for field in FieldId::ALL {
            let size = self.fields.get(field).len();
            if size > MAX_FIELD_SIZE {
                return Err(SubmissionError::FieldTooLarge {
                    field: field.wire_name(),
                    size,
                    max_size: MAX_FIELD_SIZE,
                });
            }
        }
        Ok(())
    }
}

/// Name of the file that carries `field` in an input directory
pub fn input_file_name(field: FieldId) -> String {
    format!("in_{}.dat", field.wire_name())
}

/// Load a submission from a TOML file or an input directory
pub fn load_submission(path: &Path) -> Result<Submission, SubmissionError> {
    let metadata = fs::metadata(path).map_err(|e| SubmissionError::io(path, e))?;

    let result = if metadata.is_dir() {
        load_input_dir(path)
    } else if metadata.is_file() {
        load_toml_file(path, metadata.len())
    } else {
        Err(SubmissionError::InvalidPath {
            path: path.display().to_string(),
        })
    };

    match &result {
        Ok(_) => {
            log_success!(codes::success::SUBMISSION_LOADED, "Submission loaded",
                "path" => path.display()
            );
        }
        Err(error) => {
            log_error!(error.error_code(), "Failed to load submission",
                "path" => path.display(),
                "error" => error
            );
        }
    }

    result
}

fn load_toml_file(path: &Path, size: u64) -> Result<Submission, SubmissionError> {
    if size > MAX_FILE_SIZE {
        return Err(SubmissionError::FileTooLarge {
            size,
            max_size: MAX_FILE_SIZE,
        });
    }
    let content = fs::read_to_string(path).map_err(|e| SubmissionError::io(path, e))?;
    Submission::from_toml_str(&content, &path.display().to_string())
}

/// Read every `in_<field>.dat` file present in `dir`
pub fn load_input_dir(dir: &Path) -> Result<Submission, SubmissionError> {
    let mut fields = RawFields::default();
    let mut total: u64 = 0;

    for field in FieldId::ALL {
        let path = dir.join(input_file_name(field));
        let size = match fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log_debug!("Input file absent, field left empty", "file" => path.display());
                continue;
            }
            Err(e) => return Err(SubmissionError::io(&path, e)),
        };

        if size > MAX_FIELD_SIZE as u64 {
            return Err(SubmissionError::FieldTooLarge {
                field: field.wire_name(),
                size: usize::try_from(size).unwrap_or(usize::MAX),
                max_size: MAX_FIELD_SIZE,
            });
        }
        total += size;
        if total > MAX_FILE_SIZE {
            return Err(SubmissionError::FileTooLarge {
                size: total,
                max_size: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| SubmissionError::io(&path, e))?;
        fields.set(field, content);
    }

    Ok(Submission::new(fields))
}

/// Write `in_<field>.dat` for exactly the mode's expected inputs.
///
/// Returns the paths written, in sorted field-name order.
pub fn write_input_files(
    dir: &Path,
    fields: &RawFields,
    mode: Mode,
) -> Result<Vec<PathBuf>, SubmissionError> {
    fs::create_dir_all(dir).map_err(|e| SubmissionError::io(dir, e))?;

    let mut written = Vec::new();
    for name in expected_io(mode).inputs {
        let field: FieldId = name.parse().map_err(|_| SubmissionError::InvalidPath {
            path: name.to_string(),
        })?;
        let path = dir.join(input_file_name(field));
        fs::write(&path, fields.get(field)).map_err(|e| SubmissionError::io(&path, e))?;
        written.push(path);
    }

    log_success!(codes::success::INPUT_FILES_WRITTEN, "Input files written",
        "dir" => dir.display(),
        "files" => written.len(),
        "mode" => mode
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{EffectMode, Operation};
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
operation = "construct"
effect = "mplussome"

[fields]
factors = "3"
levels = "2 2 2"
msize = "2"
tmts = """
0 0 0
1 1 1
"""
gens = "1 1 1"
det = "1/2"
twofis = "1,2"
chsets = "left over from a previous run"
"#;

    #[test]
    fn test_parse_toml_submission() {
        let submission = Submission::from_toml_str(SAMPLE, "sample").unwrap();
        assert_eq!(
            submission.mode().unwrap(),
            Mode::new(Operation::Construct, EffectMode::MainPlusSome)
        );
        assert_eq!(submission.fields.levels, "2 2 2");
        assert_eq!(submission.fields.tmts, "0 0 0\n1 1 1\n");
    }

    #[test]
    fn test_malformed_toml() {
        assert_matches!(
            Submission::from_toml_str("[fields\nfactors = 3", "bad.toml"),
            Err(SubmissionError::Malformed { path, .. }) if path == "bad.toml"
        );
        // fields must be strings
        assert_matches!(
            Submission::from_toml_str("[fields]\nfactors = 3\n", "typed.toml"),
            Err(SubmissionError::Malformed { .. })
        );
    }

    #[test]
    fn test_selections() {
        let mut submission = Submission::new(RawFields::default());
        assert_matches!(
            submission.mode(),
            Err(SubmissionError::MissingSelection { selector: "operation" })
        );

        submission.override_selections(Some("check"), Some("mplus2"));
        assert_matches!(
            submission.mode(),
            Err(SubmissionError::Mode(ModeError::UnknownEffect(_)))
        );

        submission.override_selections(None, Some("main"));
        assert_eq!(
            submission.mode().unwrap(),
            Mode::new(Operation::Check, EffectMode::Main)
        );
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submission.toml");
        fs::write(&path, SAMPLE).unwrap();

        let submission = load_submission(&path).unwrap();
        assert_eq!(submission.fields.factors, "3");
    }

    #[test]
    fn test_missing_path() {
        let dir = tempdir().unwrap();
        let error = load_submission(&dir.path().join("absent.toml")).unwrap_err();
        assert_matches!(error, SubmissionError::NotFound { .. });
        assert_eq!(error.error_code(), codes::submission::FILE_NOT_FOUND);
    }

    #[test]
    fn test_write_then_load_input_dir() {
        let dir = tempdir().unwrap();
        let submission = Submission::from_toml_str(SAMPLE, "sample").unwrap();
        let mode = submission.mode().unwrap();

        let written = write_input_files(dir.path(), &submission.fields, mode).unwrap();
        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "in_det.dat",
                "in_factors.dat",
                "in_gens.dat",
                "in_levels.dat",
                "in_msize.dat",
                "in_tmts.dat",
                "in_twofis.dat"
            ]
        );
        assert!(!dir.path().join("in_chsets.dat").exists());

        let loaded = load_submission(dir.path()).unwrap();
        assert_eq!(loaded.fields.tmts, submission.fields.tmts);
        assert_eq!(loaded.fields.twofis, "1,2");
        assert_eq!(loaded.fields.chsets, "");
        assert_eq!(loaded.operation, None);
    }

    #[test]
    fn test_oversized_input_file() {
        let dir = tempdir().unwrap();
        let big = "0 ".repeat(MAX_FIELD_SIZE / 2 + 1);
        fs::write(dir.path().join("in_chsets.dat"), big).unwrap();

        assert_matches!(
            load_input_dir(dir.path()),
            Err(SubmissionError::FieldTooLarge { field: "chsets", .. })
        );
    }
}
