//! End-to-end validation scenarios through the public API

use assert_matches::assert_matches;
use choice_validator::checks::{check_factors, check_levels, check_two_factor_interactions};
use choice_validator::config::ValidationPreferences;
use choice_validator::{
    load_submission, validate_with_preferences, write_input_files, DesignInputs, EffectMode,
    FieldId, FieldProblem, FieldStatus, Mode, Operation, RawFields, ValidationReport, Verdict,
};

fn quiet() -> ValidationPreferences {
    ValidationPreferences {
        log_each_problem: false,
        log_timing: false,
        include_banner: true,
    }
}

fn run(fields: &RawFields, operation: Operation, effect: EffectMode) -> ValidationReport {
    validate_with_preferences(fields, Mode::new(operation, effect), &quiet())
}

/// Four attributes with levels 4, 3, 3, 3 in pairs of options
fn design() -> RawFields {
    RawFields::default()
        .with(FieldId::Factors, "4")
        .with(FieldId::Levels, "4 3 3 3")
        .with(FieldId::OptionSetSize, "2")
}

/// Sixteen rows of width 8, every value inside its column's level range
fn sixteen_choice_sets() -> String {
    (0..16)
        .map(|i| {
            [
                i % 4,
                i % 3,
                (i + 1) % 3,
                (i + 2) % 3,
                (i + 1) % 4,
                (i + 2) % 3,
                i % 3,
                (i + 1) % 3,
            ]
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_sixteen_well_formed_choice_sets_are_accepted() {
    let fields = design().with(FieldId::ChoiceSets, sixteen_choice_sets());
    let report = run(&fields, Operation::Check, EffectMode::Main);

    assert_eq!(report.verdict(), Verdict::Accept, "{:?}", report.messages());
    assert!(report.messages().is_empty());
    assert_eq!(report.status(FieldId::ChoiceSets), FieldStatus::Valid);
    assert_eq!(report.status(FieldId::Treatments), FieldStatus::NotChecked);
}

#[test]
fn test_all_zero_generator_is_the_only_problem() {
    let fields = design()
        .with(FieldId::Treatments, "0 0 0 0\n1 1 1 1\n3 2 2 2")
        .with(FieldId::Generators, "0 0 0 0");
    let report = run(&fields, Operation::Construct, EffectMode::Main);

    assert_eq!(report.verdict(), Verdict::Reject);
    assert_eq!(
        report.messages(),
        vec!["In 'Sets of generator' row 1 is all zeros which is not allowed.".to_string()]
    );
    assert_eq!(report.status(FieldId::Treatments), FieldStatus::Valid);
    assert_eq!(report.status(FieldId::Generators), FieldStatus::Invalid);
    assert!(report.render(true).starts_with("Discrete Choice Experiment.\no "));
}

#[test]
fn test_non_integer_attribute_count_stops_at_the_gate() {
    let fields = design()
        .with(FieldId::Factors, "abc")
        .with(FieldId::ChoiceSets, "nonsense that would otherwise fail");
    let report = run(&fields, Operation::Check, EffectMode::MainPlusSome);

    assert_eq!(report.verdict(), Verdict::Reject);
    assert_eq!(
        report.messages(),
        vec!["The 'Number of attributes' value is not an integer.".to_string()]
    );
    assert_eq!(report.status(FieldId::Levels), FieldStatus::NotChecked);
    assert_eq!(report.status(FieldId::ChoiceSets), FieldStatus::NotChecked);
    assert_eq!(report.status(FieldId::Determinant), FieldStatus::NotChecked);
}

#[test]
fn test_determinant_above_one_is_out_of_range() {
    let fields = design()
        .with(FieldId::ChoiceSets, sixteen_choice_sets())
        .with(FieldId::Determinant, "1.5")
        .with(FieldId::TwoFactorInteractions, "1,2 3,4");
    let report = run(&fields, Operation::Check, EffectMode::MainPlusSome);

    assert_eq!(report.verdict(), Verdict::Reject);
    assert_eq!(report.problems().len(), 1);
    assert_matches!(
        &report.problems()[0],
        FieldProblem::DeterminantRange { value, .. } if value == "1.5"
    );
    assert_eq!(
        report.messages()[0],
        "The 'Determinant' is outside range [0,1]."
    );
}

#[test]
fn test_determinant_bounds_are_inclusive() {
    for det in ["0", "1", "1/1", "0.0"] {
        let fields = design()
            .with(FieldId::ChoiceSets, sixteen_choice_sets())
            .with(FieldId::Determinant, det);
        let report = run(&fields, Operation::Check, EffectMode::MainPlusAll);
        assert!(report.is_accepted(), "{}: {:?}", det, report.messages());
    }
}

#[test]
fn test_attribute_count_reports_one_problem() {
    for text in ["1", "21", "-3", "2.5", "x"] {
        let problem = check_factors(text).unwrap_err();
        assert!(
            matches!(
                problem,
                FieldProblem::NotAnInteger { .. } | FieldProblem::OutOfRange { .. }
            ),
            "{}: {:?}",
            text,
            problem
        );
    }
    assert_matches!(check_factors("x"), Err(FieldProblem::NotAnInteger { .. }));
    assert_matches!(check_factors("21"), Err(FieldProblem::OutOfRange { .. }));
}

#[test]
fn test_level_count_mismatch_reports_only_the_count() {
    let problems = check_levels("4 x 3", 4).unwrap_err();
    assert_eq!(problems.len(), 1);
    assert_matches!(problems[0], FieldProblem::TooFewValues { expected: 4, found: 3, .. });

    let problems = check_levels("4 3 3 3 99", 4).unwrap_err();
    assert_eq!(problems.len(), 1);
    assert_matches!(problems[0], FieldProblem::TooManyValues { .. });
}

#[test]
fn test_valid_levels_recheck_identically() {
    assert_eq!(check_levels("2 20 7", 3), Ok(vec![2, 20, 7]));
    assert_eq!(check_levels("2 20 7", 3), check_levels("2 20 7", 3));
}

#[test]
fn test_choice_set_width_mismatch_aborts_the_field() {
    let fields = design().with(FieldId::ChoiceSets, "0 1 2\nq q q q q q q q\n9");
    let report = run(&fields, Operation::Check, EffectMode::Main);

    assert_eq!(report.problems().len(), 1);
    assert_matches!(
        report.problems()[0],
        FieldProblem::RowLength { row: 1, expected: 8, found: 3, .. }
    );
}

#[test]
fn test_blank_lines_do_not_shift_row_numbers() {
    let fields = design()
        .with(FieldId::Treatments, "0 0 0 0\n\n\n0 0 0")
        .with(FieldId::Generators, "1 1 1 1\n\n0 0 0 0");
    let report = run(&fields, Operation::Construct, EffectMode::Main);

    assert_eq!(
        report.messages(),
        vec![
            "Incorrect row length in 'Treatment combinations' row 2.".to_string(),
            "In 'Sets of generator' row 2 is all zeros which is not allowed.".to_string(),
        ]
    );
}

#[test]
fn test_mode_checkers_do_not_short_circuit_each_other() {
    let fields = design()
        .with(FieldId::Treatments, "0 0 0")
        .with(FieldId::Generators, "1 1 1 1")
        .with(FieldId::Determinant, "2")
        .with(FieldId::TwoFactorInteractions, "1,2 3,x");
    let report = run(&fields, Operation::Construct, EffectMode::MainPlusSome);

    assert_eq!(
        report.invalid_fields(),
        vec![
            FieldId::Treatments,
            FieldId::Determinant,
            FieldId::TwoFactorInteractions
        ]
    );
    assert_eq!(report.status(FieldId::Generators), FieldStatus::Valid);
}

#[test]
fn test_malformed_second_pair_is_the_only_interaction_problem() {
    let problems = check_two_factor_interactions("1,2 3,x");
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].to_string(), "In '2 pair factors' x is not an integer.");
}

#[test]
fn test_accepted_directory_submission_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let fields = design()
        .with(FieldId::Treatments, "0 0 0 0\n1 2 2 2")
        .with(FieldId::Generators, "1 1 1 1")
        .with(FieldId::Determinant, "1/2")
        .with(FieldId::TwoFactorInteractions, "1,2")
        .with(FieldId::ChoiceSets, "not used in construct mode");
    let mode = Mode::new(Operation::Construct, EffectMode::MainPlusSome);

    assert!(validate_with_preferences(&fields, mode, &quiet()).is_accepted());

    write_input_files(dir.path(), &fields, mode).unwrap();
    let mut submission = load_submission(dir.path()).unwrap();
    submission.override_selections(Some("construct"), Some("mplussome"));

    let reloaded_mode = submission.mode().unwrap();
    assert_eq!(reloaded_mode, mode);
    assert!(validate_with_preferences(&submission.fields, reloaded_mode, &quiet()).is_accepted());
    assert_eq!(submission.fields.chsets, "");

    let inputs = DesignInputs::from_fields(&submission.fields, reloaded_mode).unwrap();
    assert_eq!(inputs.levels, vec![4, 3, 3, 3]);
    assert_eq!(inputs.generators, Some(vec![vec![1, 1, 1, 1]]));
    assert_eq!(inputs.determinant, Some(0.5));
    assert_eq!(inputs.two_factor_interactions, Some(vec![(1, 2)]));
}
