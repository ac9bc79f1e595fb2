use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::path::FieldPath;

/// A single constraint in a field's rule chain, e.g. `min:20` or
/// `regex:/^[0-9]{1,5}$/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub params: Vec<String>,
}

impl RuleSpec {
    /// Parse one `name` or `name:params` entry of a rule chain.
    ///
    /// `regex:` and `date_format:` keep the whole remainder as a single
    /// parameter since patterns and formats may contain `:` or `,`; every
    /// other rule splits its parameters on `,`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidRule("empty entry in rule chain".to_string()));
        }

        let (name, rest) = match raw.split_once(':') {
            Some((name, rest)) => (name, Some(rest)),
            None => (raw, None),
        };
        if name.is_empty() {
            return Err(Error::InvalidRule(format!("missing rule name in '{raw}'")));
        }

        let params = match rest {
            None => Vec::new(),
            Some(rest) => match name {
                "regex" | "date_format" => vec![rest.to_string()],
                _ => rest.split(',').map(|param| param.trim().to_string()).collect(),
            },
        };

        Ok(Self {
            name: name.to_string(),
            params,
        })
    }
}

/// Declarative rule for one field path.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub path: FieldPath,
    pub constraints: Vec<RuleSpec>,
}

impl FieldRule {
    /// Parse a `path => "rule|rule:param|..."` declaration.
    pub fn parse(path: &str, rules: &str) -> Result<Self> {
        let path = FieldPath::parse(path)?;
        let constraints = rules
            .split('|')
            .map(RuleSpec::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { path, constraints })
    }
}

/// Ordered rule table plus per-field message overrides.
///
/// Override keys use the declared (wildcarded) path joined with the rule
/// name, e.g. `country_code.regex` or `passengers.*.dob.required`.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
    messages: HashMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ordered table from `(path, chain)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut set = Self::new();
        for (path, rules) in pairs {
            set.rules.push(FieldRule::parse(path, rules)?);
        }
        Ok(set)
    }

    pub fn push(&mut self, rule: FieldRule) {
        self.rules.push(rule);
    }

    /// Attach a message override for `<declared path>.<rule>`.
    pub fn with_message(mut self, key: &str, message: &str) -> Self {
        self.messages.insert(key.to_string(), message.to_string());
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn message_for(&self, declared_path: &str, rule: &str) -> Option<&str> {
        self.messages
            .get(&format!("{declared_path}.{rule}"))
            .map(String::as_str)
    }

    pub fn into_parts(self) -> (Vec<FieldRule>, HashMap<String, String>) {
        (self.rules, self.messages)
    }
}
