//! Validation issues and reports shared by both validators.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable machine code, e.g. `TOKEN_UNKNOWN` or `BRACE_BALANCE`.
    pub code: String,
    pub message: String,
    pub severity: IssueSeverity,
    /// The offending selector, variable name, or token, when known.
    pub subject: Option<String>,
    pub count: Option<u64>,
}

/// Outcome of one validator run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    /// Valid means free of errors; warnings do not block delivery.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }
}
