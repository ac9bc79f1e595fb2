use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

use fareguard_core::{Error, Result, RuleSpec};

/// A built-in constraint compiled to its typed form.
///
/// Compilation happens once at validator construction, so malformed
/// patterns, formats and parameters are configuration errors rather than
/// per-request failures.
#[derive(Debug, Clone)]
pub enum BuiltinRule {
    Required,
    Sometimes,
    Email,
    Min(usize),
    Numeric,
    DateFormat(String),
    In(Vec<String>),
    Pattern(Regex),
}

/// Outcome of evaluating a single rule against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub pass: bool,
    pub message: Option<String>,
}

impl RuleOutcome {
    fn pass() -> Self {
        Self {
            pass: true,
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: Some(message.into()),
        }
    }
}

/// Returns true when `name` is one of the engine's built-in rules.
pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "required" | "sometimes" | "email" | "min" | "numeric" | "date_format" | "in" | "regex"
    )
}

/// Compile a rule spec into its built-in form.
///
/// Returns `Ok(None)` when the name is not a built-in, leaving the
/// registry to resolve it as a custom rule.
pub fn compile(spec: &RuleSpec) -> Result<Option<BuiltinRule>> {
    let rule = match spec.name.as_str() {
        "required" => BuiltinRule::Required,
        "sometimes" => BuiltinRule::Sometimes,
        "email" => BuiltinRule::Email,
        "numeric" => BuiltinRule::Numeric,
        "min" => {
            let raw = single_param(spec)?;
            let min = raw.parse::<usize>().map_err(|_| {
                Error::InvalidRule(format!("min: expected an integer parameter, got '{raw}'"))
            })?;
            BuiltinRule::Min(min)
        }
        "date_format" => {
            let format = single_param(spec)?;
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(Error::InvalidRule(format!(
                    "date_format: invalid format '{format}'"
                )));
            }
            BuiltinRule::DateFormat(format.to_string())
        }
        "in" => {
            if spec.params.is_empty() {
                return Err(Error::InvalidRule(
                    "in: requires at least one accepted value".to_string(),
                ));
            }
            BuiltinRule::In(spec.params.clone())
        }
        "regex" => {
            let raw = single_param(spec)?;
            let pattern = raw
                .strip_prefix('/')
                .and_then(|rest| rest.strip_suffix('/'))
                .unwrap_or(raw);
            let regex = Regex::new(pattern)
                .map_err(|err| Error::InvalidRule(format!("regex: invalid pattern: {err}")))?;
            BuiltinRule::Pattern(regex)
        }
        _ => return Ok(None),
    };

    Ok(Some(rule))
}

/// Evaluate a built-in rule against a resolved value.
///
/// `required` is the only rule that fails on absence; every other rule
/// silently passes when the value is absent or null, and `sometimes`
/// never fails (the validator uses it to stop the chain on absence).
pub fn evaluate(rule: &BuiltinRule, value: Option<&Value>) -> RuleOutcome {
    match rule {
        BuiltinRule::Required => {
            if is_present(value) {
                RuleOutcome::pass()
            } else {
                RuleOutcome::fail("value is required")
            }
        }
        BuiltinRule::Sometimes => RuleOutcome::pass(),
        rule => match value {
            None => RuleOutcome::pass(),
            Some(Value::Null) => RuleOutcome::pass(),
            Some(value) => evaluate_value(rule, value),
        },
    }
}

fn evaluate_value(rule: &BuiltinRule, value: &Value) -> RuleOutcome {
    match rule {
        BuiltinRule::Email => match text_of(value) {
            Some(text) if is_email(&text) => RuleOutcome::pass(),
            _ => RuleOutcome::fail("must be a valid email address"),
        },
        BuiltinRule::Min(min) => match text_of(value) {
            Some(text) if text.chars().count() >= *min => RuleOutcome::pass(),
            _ => RuleOutcome::fail(format!("must be at least {min} characters")),
        },
        BuiltinRule::Numeric => {
            if is_numeric(value) {
                RuleOutcome::pass()
            } else {
                RuleOutcome::fail("must be a number")
            }
        }
        BuiltinRule::DateFormat(format) => {
            if parses_exactly(value, format) {
                RuleOutcome::pass()
            } else {
                RuleOutcome::fail(format!("must match the date format {format}"))
            }
        }
        BuiltinRule::In(options) => match text_of(value) {
            Some(text) if options.iter().any(|option| option == &text) => RuleOutcome::pass(),
            _ => RuleOutcome::fail(format!("must be one of: {}", options.join(", "))),
        },
        BuiltinRule::Pattern(regex) => match text_of(value) {
            Some(text) if regex.is_match(&text) => RuleOutcome::pass(),
            _ => RuleOutcome::fail("value has an invalid format"),
        },
        BuiltinRule::Required | BuiltinRule::Sometimes => RuleOutcome::pass(),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// String form of a scalar; containers have none.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(text) => text.parse::<f64>().is_ok(),
        _ => false,
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || domain.contains("..") {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn parses_exactly(value: &Value, format: &str) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    if format.contains("%H") || format.contains("%M") || format.contains("%S") {
        NaiveDateTime::parse_from_str(text, format).is_ok()
    } else {
        NaiveDate::parse_from_str(text, format).is_ok()
    }
}

fn single_param<'a>(spec: &'a RuleSpec) -> Result<&'a str> {
    match spec.params.as_slice() {
        [param] => Ok(param.as_str()),
        _ => Err(Error::InvalidRule(format!(
            "{}: expected exactly one parameter",
            spec.name
        ))),
    }
}
