use fareguard_core::{
    IssueKind, ResolvedField, RuleSet, ValidationIssue, ValidationReport,
};
use fareguard_engine::{CustomRule, RuleRegistry, Validator, respond};
use serde_json::{Value, json};

/// Flags any entry whose `flagged` key is true.
struct FlagRule;

impl CustomRule for FlagRule {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        _params: &[String],
        _payload: &Value,
        report: &mut ValidationReport,
    ) {
        let flagged = field
            .value
            .and_then(|value| value.get("flagged"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if flagged {
            report.push(ValidationIssue::new(
                IssueKind::Business,
                "flag",
                field.path.as_str(),
                "entry is flagged",
            ));
        }
    }
}

fn validator(pairs: &[(&str, &str)]) -> Validator {
    let rule_set = RuleSet::from_pairs(pairs).expect("build rule set");
    Validator::new(rule_set, RuleRegistry::new()).expect("compile validator")
}

#[test]
fn clean_payload_yields_an_empty_report() {
    let validator = validator(&[("email", "required|email"), ("zip", "numeric")]);
    let report = validator.validate(&json!({"email": "a@b.com", "zip": "1234"}));
    assert!(report.is_ok());
    assert!(respond(&report).is_none());
}

#[test]
fn required_failure_stops_only_that_fields_chain() {
    let validator = validator(&[
        ("email", "required|email"),
        ("area_code", "required|numeric"),
    ]);
    let report = validator.validate(&json!({"area_code": "abc"}));

    // email: one required error, the email rule is not evaluated;
    // area_code: present, so required passes and numeric fails.
    assert_eq!(report.issues.len(), 2);
    assert_eq!(report.issues[0].path, "email");
    assert_eq!(report.issues[0].rule, "required");
    assert_eq!(report.issues[0].kind, IssueKind::Missing);
    assert_eq!(report.issues[1].path, "area_code");
    assert_eq!(report.issues[1].rule, "numeric");
    assert_eq!(report.issues[1].kind, IssueKind::Format);
}

#[test]
fn sometimes_skips_the_chain_when_the_field_is_absent() {
    let validator = validator(&[("gender", "sometimes|in:M,F,U")]);

    assert!(validator.validate(&json!({})).is_ok());
    assert!(validator.validate(&json!({"gender": "M"})).is_ok());

    let report = validator.validate(&json!({"gender": "X"}));
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].rule, "in");
}

#[test]
fn format_failures_do_not_stop_later_rules() {
    let validator = validator(&[("code", "min:5|numeric")]);
    let report = validator.validate(&json!({"code": "ab"}));

    assert_eq!(report.issues.len(), 2);
    assert_eq!(report.issues[0].rule, "min");
    assert_eq!(report.issues[1].rule, "numeric");
}

#[test]
fn message_overrides_replace_the_default() {
    let rule_set = RuleSet::from_pairs(&[("country_code", "required|regex:/^[0-9]{1,5}$/")])
        .expect("build rule set")
        .with_message("country_code.regex", "You have entered the invalid country code");
    let validator = Validator::new(rule_set, RuleRegistry::new()).expect("compile validator");

    let report = validator.validate(&json!({"country_code": "abcde"}));
    assert_eq!(report.issues.len(), 1);
    assert_eq!(
        report.issues[0].message,
        "You have entered the invalid country code"
    );
}

#[test]
fn wildcard_rules_use_the_declared_path_for_overrides() {
    let rule_set = RuleSet::from_pairs(&[("passengers.*.dob", "required|date_format:%Y-%m-%d")])
        .expect("build rule set")
        .with_message("passengers.*.dob.required", "Passenger date of birth is required");
    let validator = Validator::new(rule_set, RuleRegistry::new()).expect("compile validator");

    let report = validator.validate(&json!({"passengers": [{"firstName": "John"}]}));
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].path, "passengers.0.dob");
    assert_eq!(report.issues[0].message, "Passenger date of birth is required");
}

#[test]
fn wildcard_over_an_empty_array_contributes_no_errors() {
    let validator = validator(&[("extraServices.*.serviceId", "sometimes|numeric")]);
    assert!(validator.validate(&json!({"extraServices": []})).is_ok());
    assert!(validator.validate(&json!({})).is_ok());
}

#[test]
fn custom_rules_run_through_the_registry() {
    let mut registry = RuleRegistry::new();
    registry
        .register("flag", Box::new(FlagRule))
        .expect("register rule");
    let rule_set = RuleSet::from_pairs(&[("entries.*", "flag")]).expect("build rule set");
    let validator = Validator::new(rule_set, registry).expect("compile validator");

    let report = validator.validate(&json!({"entries": [
        {"flagged": false},
        {"flagged": true},
    ]}));
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].path, "entries.1");
    assert_eq!(report.issues[0].kind, IssueKind::Business);
}

#[test]
fn unknown_rule_names_are_configuration_errors() {
    let rule_set = RuleSet::from_pairs(&[("sessionId", "required|session_expired")])
        .expect("build rule set");
    assert!(Validator::new(rule_set, RuleRegistry::new()).is_err());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = RuleRegistry::new();
    registry
        .register("flag", Box::new(FlagRule))
        .expect("first registration");
    assert!(registry.register("flag", Box::new(FlagRule)).is_err());
    assert!(registry.register("required", Box::new(FlagRule)).is_err());
}

#[test]
fn validation_is_idempotent_for_the_same_payload() {
    let validator = validator(&[
        ("email", "required|email"),
        ("passengers.*.dob", "required|date_format:%Y-%m-%d"),
    ]);
    let payload = json!({"email": "nope", "passengers": [{"dob": "not-a-date"}]});

    let first = validator.validate(&payload);
    let second = validator.validate(&payload);
    assert_eq!(first, second);
}

#[test]
fn envelope_reports_the_http_equivalent_status() {
    let validator = validator(&[("email", "required|email")]);
    let report = validator.validate(&json!({}));
    let envelope = respond(&report).expect("failure envelope");
    assert_eq!(envelope.status(), 400);
    assert_eq!(envelope.errors["email"].len(), 1);
}
