//! Core contracts for the Fareguard validation engine.
//!
//! This crate defines the rule declaration types, dotted/wildcard field
//! path resolution, and the issue/report/envelope contracts shared by the
//! engine and the booking rule set.

pub mod error;
pub mod issue;
pub mod path;
pub mod rule;

pub use error::{Error, Result};
pub use issue::{FailureEnvelope, IssueKind, ValidationIssue, ValidationReport};
pub use path::{FieldPath, PathSegment, ResolvedField, resolve};
pub use rule::{FieldRule, RuleSet, RuleSpec};
