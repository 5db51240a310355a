// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use serde::Serialize;
use std::fmt;

use crate::config::Severity;

/// A single reported rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Name of the violated rule.
    pub rule: String,
    /// Configured severity of the rule.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Line number where the violation was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    /// Whether this finding should block the commit.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.severity, self.message, self.rule)
    }
}

/// Result of validating a commit message.
///
/// Findings are kept in rule evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    findings: Vec<Finding>,
}

impl ValidationResult {
    /// Create an empty validation result.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_findings(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// All findings, in evaluation order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Whether any `error` finding was reported.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    /// Error findings.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    /// Warning findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    /// Findings reported by one rule.
    pub fn findings_for<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.rule == rule)
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.findings.len()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let errors = self.errors().count();
        let warnings = self.warnings().count();

        if errors == 0 {
            if warnings == 0 {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", warnings)
            }
        } else {
            format!("Invalid ({} errors, {} warnings)", errors, warnings)
        }
    }

    /// JSON view for machine-readable output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "errors": self.errors().count(),
            "warnings": self.warnings().count(),
            "findings": self.findings,
        })
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}
