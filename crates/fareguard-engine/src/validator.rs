use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use fareguard_core::{
    Error, FieldPath, IssueKind, ResolvedField, Result, RuleSet, ValidationIssue, ValidationReport,
    resolve,
};

use crate::builtin::{self, BuiltinRule};
use crate::registry::RuleRegistry;

enum Constraint {
    Builtin(BuiltinRule),
    Custom { params: Vec<String> },
}

struct CompiledConstraint {
    name: String,
    kind: Constraint,
}

struct CompiledField {
    path: FieldPath,
    chain: Vec<CompiledConstraint>,
}

/// Evaluates a compiled rule table against request payloads.
///
/// Construction compiles every constraint, so unknown rule names, bad
/// patterns and bad parameters fail here, at startup. `validate` itself
/// never errors; every rule failure lands in the returned report.
pub struct Validator {
    fields: Vec<CompiledField>,
    registry: RuleRegistry,
    messages: HashMap<String, String>,
}

impl Validator {
    pub fn new(rule_set: RuleSet, registry: RuleRegistry) -> Result<Self> {
        let (rules, messages) = rule_set.into_parts();

        let mut fields = Vec::with_capacity(rules.len());
        for rule in rules {
            let mut chain = Vec::with_capacity(rule.constraints.len());
            for spec in &rule.constraints {
                let kind = match builtin::compile(spec)? {
                    Some(compiled) => Constraint::Builtin(compiled),
                    None => {
                        if registry.get(&spec.name).is_none() {
                            return Err(Error::InvalidRule(format!(
                                "unknown rule '{}' for field '{}'",
                                spec.name, rule.path
                            )));
                        }
                        Constraint::Custom {
                            params: spec.params.clone(),
                        }
                    }
                };
                chain.push(CompiledConstraint {
                    name: spec.name.clone(),
                    kind,
                });
            }
            fields.push(CompiledField {
                path: rule.path,
                chain,
            });
        }

        Ok(Self {
            fields,
            registry,
            messages,
        })
    }

    /// Evaluate every field rule in declaration order.
    ///
    /// The payload is read-only; the report is request-scoped and
    /// accumulates every failure across all fields.
    pub fn validate(&self, payload: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();
        debug!(fields = self.fields.len(), "validating payload");

        for field in &self.fields {
            for resolved in resolve(payload, &field.path) {
                self.evaluate_chain(field, &resolved, payload, &mut report);
            }
        }

        report
    }

    fn evaluate_chain(
        &self,
        field: &CompiledField,
        resolved: &ResolvedField<'_>,
        payload: &Value,
        report: &mut ValidationReport,
    ) {
        for constraint in &field.chain {
            match &constraint.kind {
                Constraint::Builtin(BuiltinRule::Sometimes) => {
                    if resolved.value.is_none() {
                        return;
                    }
                }
                Constraint::Builtin(rule) => {
                    let outcome = builtin::evaluate(rule, resolved.value);
                    if outcome.pass {
                        continue;
                    }

                    let required = matches!(rule, BuiltinRule::Required);
                    let message = self
                        .messages
                        .get(&format!("{}.{}", field.path.as_str(), constraint.name))
                        .cloned()
                        .or(outcome.message)
                        .unwrap_or_else(|| "value is invalid".to_string());
                    let kind = if required {
                        IssueKind::Missing
                    } else {
                        IssueKind::Format
                    };

                    debug!(path = %resolved.path, rule = %constraint.name, "rule failed");
                    report.push(ValidationIssue::new(
                        kind,
                        constraint.name.as_str(),
                        resolved.path.as_str(),
                        message,
                    ));

                    // A missing value stops its own chain; sibling fields
                    // and later rules are unaffected.
                    if required {
                        return;
                    }
                }
                Constraint::Custom { params } => {
                    if let Some(rule) = self.registry.get(&constraint.name) {
                        rule.check(resolved, params, payload, report);
                    }
                }
            }
        }
    }
}
