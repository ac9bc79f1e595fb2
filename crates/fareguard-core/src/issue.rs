use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope message returned on every failed validation.
pub const FAILURE_MESSAGE: &str = "The given data is invalid";

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required field is absent, null, or empty.
    Missing,
    /// The value does not satisfy a format rule (regex, date, numeric, enum).
    Format,
    /// A business rule rejected the value or its sibling object.
    Business,
    /// The session lookup answered and rejected the session.
    SessionInvalid,
    /// The session lookup could not answer; never merged with a rejection.
    SessionLookupFailed,
}

/// Structured validation issue tied to a concrete field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Name of the rule that failed.
    pub rule: String,
    /// Concrete (wildcard-expanded) field path.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        kind: IssueKind,
        rule: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            rule: rule.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Aggregated, order-preserving validation report for one payload.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when no rule failed.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Merge another report into this one, preserving order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }
}

/// Failure payload handed back to the caller when validation fails.
///
/// Mirrors the booking API contract: messages grouped by field path, an
/// always-false `success` flag, and an HTTP 400-equivalent status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FailureEnvelope {
    pub success: bool,
    pub message: String,
    pub data: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FailureEnvelope {
    /// HTTP-equivalent status signalled alongside the envelope.
    pub const STATUS: u16 = 400;

    /// Group a report's messages by concrete path, keeping per-path
    /// evaluation order.
    pub fn from_report(report: &ValidationReport) -> Self {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &report.issues {
            errors
                .entry(issue.path.clone())
                .or_default()
                .push(issue.message.clone());
        }

        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
            data: BTreeMap::new(),
            errors,
        }
    }

    pub fn status(&self) -> u16 {
        Self::STATUS
    }
}
