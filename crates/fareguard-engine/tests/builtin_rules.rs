use fareguard_core::RuleSpec;
use fareguard_engine::builtin::{compile, evaluate};
use serde_json::{Value, json};

fn compiled(raw: &str) -> fareguard_engine::BuiltinRule {
    compile(&RuleSpec::parse(raw).expect("parse spec"))
        .expect("compile rule")
        .expect("rule is a built-in")
}

fn passes(raw: &str, value: &Value) -> bool {
    evaluate(&compiled(raw), Some(value)).pass
}

#[test]
fn required_rejects_absent_null_and_empty() {
    let rule = compiled("required");
    assert!(!evaluate(&rule, None).pass);
    assert!(!evaluate(&rule, Some(&Value::Null)).pass);
    assert!(!evaluate(&rule, Some(&json!(""))).pass);
    assert!(evaluate(&rule, Some(&json!("x"))).pass);
    assert!(evaluate(&rule, Some(&json!(0))).pass);
}

#[test]
fn non_required_rules_skip_absent_and_null_values() {
    for raw in ["email", "min:5", "numeric", "date_format:%Y-%m-%d", "in:a,b"] {
        let rule = compiled(raw);
        assert!(evaluate(&rule, None).pass, "{raw} should skip absent");
        assert!(
            evaluate(&rule, Some(&Value::Null)).pass,
            "{raw} should skip null"
        );
    }
}

#[test]
fn email_requires_local_part_and_dotted_domain() {
    assert!(passes("email", &json!("traveller@example.com")));
    assert!(!passes("email", &json!("traveller@example")));
    assert!(!passes("email", &json!("@example.com")));
    assert!(!passes("email", &json!("two words@example.com")));
    assert!(!passes("email", &json!("no-at-sign.example.com")));
}

#[test]
fn min_counts_characters_of_the_string_form() {
    assert!(passes("min:20", &json!("ROUTE-0123456789-ABCDEF")));
    assert!(!passes("min:20", &json!("short")));
    assert!(passes("min:3", &json!(1234)));
}

#[test]
fn numeric_accepts_numbers_and_numeric_strings() {
    assert!(passes("numeric", &json!(42)));
    assert!(passes("numeric", &json!("42.5")));
    assert!(!passes("numeric", &json!("abc")));
    assert!(!passes("numeric", &json!([1])));
}

#[test]
fn date_format_parses_exactly() {
    assert!(passes("date_format:%Y-%m-%d", &json!("1990-05-14")));
    assert!(!passes("date_format:%Y-%m-%d", &json!("14-05-1990")));
    assert!(!passes("date_format:%Y-%m-%d", &json!("1990-05-14T00:00:00")));
    assert!(passes(
        "date_format:%Y-%m-%dT%H:%M:%S",
        &json!("2026-09-01T08:30:00")
    ));
    assert!(!passes("date_format:%Y-%m-%dT%H:%M:%S", &json!("2026-09-01")));
}

#[test]
fn in_rule_is_case_sensitive() {
    assert!(passes("in:GDS,LCC", &json!("GDS")));
    assert!(!passes("in:GDS,LCC", &json!("gds")));
    assert!(!passes("in:GDS,LCC", &json!("NDC")));
}

#[test]
fn regex_honours_anchors_as_written() {
    assert!(passes("regex:/^[0-9]{1,5}$/", &json!("91")));
    assert!(!passes("regex:/^[0-9]{1,5}$/", &json!("abcde")));
    assert!(!passes("regex:/^[0-9]{1,5}$/", &json!("123456")));

    // End-anchored only, as the booking name rules are declared.
    assert!(passes("regex:/[A-Z][a-zA-Z]{2,28}$/", &json!("John")));
    assert!(!passes("regex:/[A-Z][a-zA-Z]{2,28}$/", &json!("john")));
}

#[test]
fn malformed_parameters_fail_at_compile_time() {
    let bad_min = RuleSpec::parse("min:twenty").expect("parse spec");
    assert!(compile(&bad_min).is_err());

    let bad_regex = RuleSpec::parse("regex:/[unclosed/").expect("parse spec");
    assert!(compile(&bad_regex).is_err());

    let bad_format = RuleSpec::parse("date_format:%Q").expect("parse spec");
    assert!(compile(&bad_format).is_err());
}

#[test]
fn unknown_names_are_not_builtins() {
    let spec = RuleSpec::parse("passenger_year").expect("parse spec");
    assert!(compile(&spec).expect("compile").is_none());
}
