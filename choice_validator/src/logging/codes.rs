//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Submission loading error codes
pub mod submission {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const MALFORMED_SUBMISSION: Code = Code::new("E013");
    pub const FIELD_TOO_LARGE: Code = Code::new("E014");
}

/// Required field left empty
pub mod presence {
    use super::Code;

    pub const REQUIRED_FIELD_EMPTY: Code = Code::new("E301");
}

/// Token does not have the expected numeral shape
pub mod syntax {
    use super::Code;

    pub const NUMERAL_SYNTAX: Code = Code::new("E310");
}

/// Row width or vector length mismatch
pub mod dimension {
    use super::Code;

    pub const DIMENSION_MISMATCH: Code = Code::new("E320");
}

/// Numerically valid value outside its interval
pub mod range {
    use super::Code;

    pub const VALUE_OUT_OF_RANGE: Code = Code::new("E330");
}

/// Malformed pairs and forbidden rows
pub mod structural {
    use super::Code;

    pub const MALFORMED_PAIR: Code = Code::new("E340");
    pub const ALL_ZERO_GENERATOR_ROW: Code = Code::new("E341");
}

/// Mode selection error codes
pub mod mode {
    use super::Code;

    pub const UNKNOWN_OPERATION: Code = Code::new("E350");
    pub const UNKNOWN_EFFECT: Code = Code::new("E351");
}

/// Submission screening error codes
pub mod screening {
    use super::Code;

    pub const SUBMISSION_REJECTED: Code = Code::new("E360");
}

/// Typed conversion error codes
pub mod conversion {
    use super::Code;

    pub const CONVERSION_FAILED: Code = Code::new("E370");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const MANDATORY_CHECKS_PASSED: Code = Code::new("I100");
    pub const MODE_RESOLVED: Code = Code::new("I101");
    pub const VALIDATION_ACCEPTED: Code = Code::new("I102");
    pub const SCREENING_PASSED: Code = Code::new("I103");
    pub const SUBMISSION_LOADED: Code = Code::new("I104");
    pub const INPUT_FILES_WRITTEN: Code = Code::new("I105");
    pub const CONVERSION_COMPLETE: Code = Code::new("I106");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
            // Submission loading
            ErrorMetadata::new(
                "E005",
                "Submission",
                Severity::Medium,
                false,
                true,
                "Submission file not found at specified path",
                "Check the path and ensure the file exists",
            ),
            ErrorMetadata::new(
                "E007",
                "Submission",
                Severity::Medium,
                false,
                true,
                "Submission file exceeds maximum size limit",
                "Reduce the submission size or use a build profile with a larger limit",
            ),
            ErrorMetadata::new(
                "E011",
                "Submission",
                Severity::Medium,
                false,
                true,
                "I/O error while reading or writing submission files",
                "Check file permissions and available disk space",
            ),
            ErrorMetadata::new(
                "E012",
                "Submission",
                Severity::Medium,
                false,
                true,
                "Path is neither a submission file nor a directory",
                "Pass a .toml submission file or a directory of in_<field>.dat files",
            ),
            ErrorMetadata::new(
                "E013",
                "Submission",
                Severity::Medium,
                false,
                true,
                "Submission file is not valid TOML or has the wrong shape",
                "Provide a [fields] table plus operation and effect keys",
            ),
            ErrorMetadata::new(
                "E014",
                "Submission",
                Severity::Medium,
                false,
                true,
                "A single submission field exceeds the maximum field size",
                "Split the experiment or reduce the matrix size",
            ),
            // Engine problems
            ErrorMetadata::new(
                "E301",
                "Presence",
                Severity::Medium,
                true,
                false,
                "A required field is empty",
                "Fill in the field before submitting",
            ),
            ErrorMetadata::new(
                "E310",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "A token does not have the expected numeral form",
                "Use whole numbers, or a fraction, decimal or exponent for the determinant",
            ),
            ErrorMetadata::new(
                "E320",
                "Dimension",
                Severity::Medium,
                true,
                false,
                "Row width or vector length does not match the design",
                "Check the attribute count and option set size against the data",
            ),
            ErrorMetadata::new(
                "E330",
                "Range",
                Severity::Medium,
                true,
                false,
                "A value lies outside its permitted interval",
                "Use values inside the documented limits",
            ),
            ErrorMetadata::new(
                "E340",
                "Structural",
                Severity::Low,
                true,
                false,
                "Two-factor interaction list is malformed",
                "Write pairs as i,j separated by whitespace",
            ),
            ErrorMetadata::new(
                "E341",
                "Structural",
                Severity::Low,
                true,
                false,
                "A generator row contains only zeros",
                "Remove the row or give it at least one non-zero entry",
            ),
            // Mode selection
            ErrorMetadata::new(
                "E350",
                "Mode",
                Severity::High,
                false,
                true,
                "Operation selection is neither check nor construct",
                "Select check or construct",
            ),
            ErrorMetadata::new(
                "E351",
                "Mode",
                Severity::High,
                false,
                true,
                "Effect selection is not main, mplusall or mplussome",
                "Select main, mplusall or mplussome",
            ),
            // Screening and conversion
            ErrorMetadata::new(
                "E360",
                "Screening",
                Severity::High,
                false,
                true,
                "Submission failed server-side screening",
                "Correct the reported field and resubmit",
            ),
            ErrorMetadata::new(
                "E370",
                "Conversion",
                Severity::High,
                false,
                true,
                "Validated text could not be converted to design inputs",
                "Validate the submission before converting it",
            ),
            // Success codes
            ErrorMetadata::new(
                "I001",
                "Success",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "No action required",
            ),
            ErrorMetadata::new(
                "I004",
                "Success",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I100",
                "Success",
                Severity::Low,
                true,
                false,
                "Mandatory design checks passed",
                "Mode-selected checks will run next",
            ),
            ErrorMetadata::new(
                "I101",
                "Success",
                Severity::Low,
                true,
                false,
                "Required field set resolved from mode selections",
                "No action required",
            ),
            ErrorMetadata::new(
                "I102",
                "Success",
                Severity::Low,
                true,
                false,
                "Submission accepted",
                "Submission may be forwarded for processing",
            ),
            ErrorMetadata::new(
                "I103",
                "Success",
                Severity::Low,
                true,
                false,
                "Submission passed server-side screening",
                "No action required",
            ),
            ErrorMetadata::new(
                "I104",
                "Success",
                Severity::Low,
                true,
                false,
                "Submission loaded",
                "No action required",
            ),
            ErrorMetadata::new(
                "I105",
                "Success",
                Severity::Low,
                true,
                false,
                "Input files written for the expected inputs",
                "No action required",
            ),
            ErrorMetadata::new(
                "I106",
                "Success",
                Severity::Low,
                true,
                false,
                "Design inputs converted to typed values",
                "No action required",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_codes_registered() {
        for code in [
            presence::REQUIRED_FIELD_EMPTY,
            syntax::NUMERAL_SYNTAX,
            dimension::DIMENSION_MISMATCH,
            range::VALUE_OUT_OF_RANGE,
            structural::MALFORMED_PAIR,
            structural::ALL_ZERO_GENERATOR_ROW,
        ] {
            assert!(get_error_metadata(code.as_str()).is_some(), "{}", code);
            assert!(is_recoverable(code.as_str()));
            assert!(!requires_halt(code.as_str()));
        }
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
    }

    #[test]
    fn test_categories() {
        assert_eq!(get_category("E320"), "Dimension");
        assert_eq!(get_category("E005"), "Submission");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
    }
}
