//! Validation orchestrator
//!
//! A pass normalizes every field, runs the three mandatory checkers, and only
//! when they are all clean resolves the mode's required fields and runs
//! their checkers. Mode-selected checkers are independent of each other and
//! all run even when a sibling reports problems.

pub mod report;

pub use report::{FieldStatus, ProblemRecord, ReportSummary, ValidationReport, Verdict, BANNER};

use crate::checks::{self, DesignSpec, FieldProblem};
use crate::config::ValidationPreferences;
use crate::fields::{FieldId, RawFields};
use crate::logging::codes;
use crate::mode::{resolve_required_fields, Mode};
use crate::{log_debug, log_error, log_info, log_performance, log_success, log_warning};
use std::time::Instant;

/// Validate with preferences taken from the environment
pub fn validate(fields: &RawFields, mode: Mode) -> ValidationReport {
    validate_with_preferences(fields, mode, &ValidationPreferences::default())
}

pub fn validate_with_preferences(
    fields: &RawFields,
    mode: Mode,
    preferences: &ValidationPreferences,
) -> ValidationReport {
    let start_time = Instant::now();

    log_info!("Starting validation pass", "mode" => mode);

    let fields = fields.normalized();
    let mut report = ValidationReport::new(mode);

    match run_mandatory_checks(&fields, &mut report) {
        Some(spec) => {
            log_success!(codes::success::MANDATORY_CHECKS_PASSED,
                "Mandatory design checks passed",
                "factors" => spec.factor_count,
                "option_set_size" => spec.option_set_size
            );
            run_mode_checks(&fields, mode, &spec, &mut report);
        }
        None => {
            log_warning!("Mandatory checks failed; mode-selected checks skipped",
                "problems" => report.problems().len()
            );
        }
    }

    if preferences.log_each_problem {
        for problem in report.problems() {
            log_problem(problem);
        }
    }

    match report.verdict() {
        Verdict::Accept => {
            log_success!(codes::success::VALIDATION_ACCEPTED, "Submission accepted",
                "mode" => mode
            );
        }
        Verdict::Reject => {
            log_info!("Submission rejected",
                "mode" => mode,
                "problems" => report.problems().len(),
                "invalid_fields" => report.invalid_fields().len()
            );
        }
    }

    if preferences.log_timing {
        log_performance!(codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Validation pass complete",
            duration = start_time.elapsed(),
            "problems" => report.problems().len()
        );
    }

    report
}

/// Attribute count, level vector and option-set size. Levels are only
/// checked once the attribute count is known to be good.
fn run_mandatory_checks(fields: &RawFields, report: &mut ValidationReport) -> Option<DesignSpec> {
    let factor_count = match checks::check_factors(&fields.factors) {
        Ok(count) => {
            report.record(FieldId::Factors, Vec::new());
            Some(count)
        }
        Err(problem) => {
            report.record(FieldId::Factors, vec![problem]);
            None
        }
    };

    let levels = factor_count.and_then(|count| match checks::check_levels(&fields.levels, count) {
        Ok(levels) => {
            report.record(FieldId::Levels, Vec::new());
            Some(levels)
        }
        Err(problems) => {
            report.record(FieldId::Levels, problems);
            None
        }
    });

    let option_set_size = match checks::check_option_set_size(&fields.msize) {
        Ok(size) => {
            report.record(FieldId::OptionSetSize, Vec::new());
            Some(size)
        }
        Err(problem) => {
            report.record(FieldId::OptionSetSize, vec![problem]);
            None
        }
    };

    Some(DesignSpec::new(factor_count?, levels?, option_set_size?))
}

fn run_mode_checks(fields: &RawFields, mode: Mode, spec: &DesignSpec, report: &mut ValidationReport) {
    let required = resolve_required_fields(mode);

    log_success!(codes::success::MODE_RESOLVED, "Required fields resolved",
        "mode" => mode,
        "required" => required.describe()
    );

    for field in required.iter().filter(|f| !is_mandatory(*f)) {
        log_debug!("Checking field", "field" => field.wire_name());
        let problems = checks::check_optional_field(field, fields, spec);
        report.record(field, problems);
    }
}

fn is_mandatory(field: FieldId) -> bool {
    matches!(
        field,
        FieldId::Factors | FieldId::Levels | FieldId::OptionSetSize
    )
}

fn log_problem(problem: &FieldProblem) {
    log_error!(problem.error_code(), &problem.to_string(),
        position = problem.position(),
        "field" => problem.field().wire_name(),
        "error_type" => problem.error_type(),
        "severity" => problem.severity()
    );
}
