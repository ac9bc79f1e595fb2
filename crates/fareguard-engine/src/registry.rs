use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use fareguard_core::{Error, ResolvedField, Result, ValidationReport};

use crate::builtin;

/// Cross-field rule with access to the whole resolved value and payload.
///
/// Custom rules signal failure only by appending issues to `report`;
/// there is no boolean verdict. The full payload is passed explicitly so
/// rules never reach into ambient request state.
pub trait CustomRule: Send + Sync {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        params: &[String],
        payload: &Value,
        report: &mut ValidationReport,
    );
}

/// Name-keyed registry of custom rules, populated once at startup.
#[derive(Default)]
pub struct RuleRegistry {
    custom: HashMap<String, Box<dyn CustomRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom rule under a unique name.
    ///
    /// Names must not collide with built-in rules or earlier
    /// registrations; a collision is a configuration error.
    pub fn register(&mut self, name: &str, rule: Box<dyn CustomRule>) -> Result<()> {
        if builtin::is_builtin(name) {
            return Err(Error::DuplicateRule(format!(
                "'{name}' is a built-in rule name"
            )));
        }
        if self.custom.contains_key(name) {
            return Err(Error::DuplicateRule(format!(
                "custom rule '{name}' is already registered"
            )));
        }
        self.custom.insert(name.to_string(), rule);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn CustomRule> {
        self.custom.get(name).map(Box::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        builtin::is_builtin(name) || self.custom.contains_key(name)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}
