//! Validation report: verdict, ordered problems and per-field status

use crate::checks::{FieldProblem, ProblemKind};
use crate::fields::FieldId;
use crate::mode::Mode;
use serde::Serialize;
use std::collections::BTreeMap;

/// First line of every rendered report
pub const BANNER: &str = "Discrete Choice Experiment.";

/// Prefix for each rendered problem line
pub const MESSAGE_PREFIX: &str = "o ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Accept,
    Reject,
}

/// What the UI should show next to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Valid,
    Invalid,
    /// Not required by the mode, or skipped because a field it depends on failed
    NotChecked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    mode: Mode,
    problems: Vec<FieldProblem>,
    statuses: BTreeMap<FieldId, FieldStatus>,
}

impl ValidationReport {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            problems: Vec::new(),
            statuses: FieldId::ALL
                .into_iter()
                .map(|field| (field, FieldStatus::NotChecked))
                .collect(),
        }
    }

    /// Record the outcome of one checker run
    pub(crate) fn record(&mut self, field: FieldId, problems: Vec<FieldProblem>) {
        let status = if problems.is_empty() {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        };
        self.statuses.insert(field, status);
        self.problems.extend(problems);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn verdict(&self) -> Verdict {
        if self.problems.is_empty() {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict() == Verdict::Accept
    }

    pub fn problems(&self) -> &[FieldProblem] {
        &self.problems
    }

    /// Problem messages in report order
    pub fn messages(&self) -> Vec<String> {
        self.problems.iter().map(|p| p.to_string()).collect()
    }

    pub fn problems_for(&self, field: FieldId) -> impl Iterator<Item = &FieldProblem> + '_ {
        self.problems.iter().filter(move |p| p.field() == field)
    }

    pub fn status(&self, field: FieldId) -> FieldStatus {
        self.statuses
            .get(&field)
            .copied()
            .unwrap_or(FieldStatus::NotChecked)
    }

    pub fn statuses(&self) -> &BTreeMap<FieldId, FieldStatus> {
        &self.statuses
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        self.statuses
            .iter()
            .filter(|(_, status)| **status == FieldStatus::Invalid)
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn count_by_kind(&self, kind: ProblemKind) -> usize {
        self.problems.iter().filter(|p| p.kind() == kind).count()
    }

    /// Text for the user: optional banner, then one `o ` line per problem
    pub fn render(&self, include_banner: bool) -> String {
        let mut lines = Vec::with_capacity(self.problems.len() + 1);
        if include_banner {
            lines.push(BANNER.to_string());
        }
        if self.problems.is_empty() {
            lines.push("All inputs passed validation.".to_string());
        }
        for problem in &self.problems {
            lines.push(format!("{}{}", MESSAGE_PREFIX, problem));
        }
        lines.join("\n")
    }

    /// Serializable view of the report
    pub fn to_summary(&self) -> ReportSummary {
        ReportSummary {
            operation: self.mode.operation.wire_name(),
            effect: self.mode.effect.wire_name(),
            verdict: self.verdict(),
            banner: BANNER,
            messages: self.messages(),
            problems: self.problems.iter().map(ProblemRecord::from).collect(),
            fields: self
                .statuses
                .iter()
                .map(|(field, status)| (field.wire_name(), *status))
                .collect(),
        }
    }

    /// JSON envelope stamped with the generation time
    pub fn to_json_envelope(&self) -> Result<String, serde_json::Error> {
        let envelope = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "validator_version": env!("CARGO_PKG_VERSION"),
            "report": self.to_summary(),
        });
        serde_json::to_string_pretty(&envelope)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub operation: &'static str,
    pub effect: &'static str,
    pub verdict: Verdict,
    pub banner: &'static str,
    pub messages: Vec<String>,
    pub problems: Vec<ProblemRecord>,
    pub fields: BTreeMap<&'static str, FieldStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProblemRecord {
    pub field: &'static str,
    pub kind: ProblemKind,
    pub code: &'static str,
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl From<&FieldProblem> for ProblemRecord {
    fn from(problem: &FieldProblem) -> Self {
        let position = problem.position();
        Self {
            field: problem.field().wire_name(),
            kind: problem.kind(),
            code: problem.error_code().as_str(),
            error_type: problem.error_type(),
            message: problem.to_string(),
            row: position.map(|p| p.row),
            column: match problem {
                FieldProblem::CellNotInteger { .. } | FieldProblem::CellOutOfRange { .. } => {
                    position.map(|p| p.column)
                }
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{EffectMode, Operation};
    use crate::utils::CellPosition;

    fn rejected() -> ValidationReport {
        let mut report = ValidationReport::new(Mode::new(Operation::Check, EffectMode::Main));
        report.record(FieldId::Factors, Vec::new());
        report.record(
            FieldId::ChoiceSets,
            vec![FieldProblem::CellNotInteger {
                field: FieldId::ChoiceSets,
                position: CellPosition::new(2, 3),
                value: "q".into(),
            }],
        );
        report
    }

    #[test]
    fn test_new_report_accepts_with_nothing_checked() {
        let report = ValidationReport::new(Mode::new(Operation::Check, EffectMode::Main));
        assert!(report.is_accepted());
        assert_eq!(report.status(FieldId::Levels), FieldStatus::NotChecked);
    }

    #[test]
    fn test_statuses_follow_recorded_problems() {
        let report = rejected();
        assert_eq!(report.verdict(), Verdict::Reject);
        assert_eq!(report.status(FieldId::Factors), FieldStatus::Valid);
        assert_eq!(report.status(FieldId::ChoiceSets), FieldStatus::Invalid);
        assert_eq!(report.invalid_fields(), vec![FieldId::ChoiceSets]);
        assert_eq!(report.count_by_kind(ProblemKind::Syntax), 1);
        assert_eq!(report.problems_for(FieldId::ChoiceSets).count(), 1);
    }

    #[test]
    fn test_render() {
        let report = rejected();
        assert_eq!(
            report.render(true),
            "Discrete Choice Experiment.\no In 'Choice Sets' position (2,3) the value q is not an integer."
        );
        assert!(report.render(false).starts_with("o In 'Choice Sets'"));
    }

    #[test]
    fn test_json_envelope() {
        let json = rejected().to_json_envelope().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["generated_at"].as_str().is_some());
        assert_eq!(value["report"]["verdict"], "reject");
        assert_eq!(value["report"]["fields"]["chsets"], "invalid");
        assert_eq!(value["report"]["fields"]["det"], "not_checked");
        assert_eq!(value["report"]["problems"][0]["code"], "E310");
        assert_eq!(value["report"]["problems"][0]["column"], 3);
    }
}
