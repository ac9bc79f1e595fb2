use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use fareguard_core::{IssueKind, ResolvedField, ValidationIssue, ValidationReport};
use fareguard_engine::CustomRule;

use crate::age::age_in_years;
use crate::policy::BookingPolicy;
use crate::session::{SessionError, SessionLookup};

const DOB_FORMAT: &str = "%Y-%m-%d";

fn passenger_field<'a>(field: &ResolvedField<'a>, key: &str) -> Option<&'a str> {
    field
        .value
        .and_then(Value::as_object)
        .and_then(|passenger| passenger.get(key))
        .and_then(Value::as_str)
}

/// Rejects children and infants older than the policy ceilings.
///
/// Runs on a whole `passengers.*` object; a malformed or absent dob is
/// left to the `date_format`/`required` rules on `passengers.*.dob`.
pub struct PassengerAgeRule {
    policy: BookingPolicy,
    today: NaiveDate,
}

impl PassengerAgeRule {
    pub fn new(policy: BookingPolicy, today: NaiveDate) -> Self {
        Self { policy, today }
    }
}

impl CustomRule for PassengerAgeRule {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        _params: &[String],
        _payload: &Value,
        report: &mut ValidationReport,
    ) {
        let Some(kind) = passenger_field(field, "passengerType") else {
            return;
        };
        let Some(dob) = passenger_field(field, "dob") else {
            return;
        };
        let Ok(dob) = NaiveDate::parse_from_str(dob, DOB_FORMAT) else {
            return;
        };

        let (label, ceiling) = match kind.to_lowercase().as_str() {
            "child" => ("child", self.policy.child_age_ceiling),
            "infant" => ("infant", self.policy.infant_age_ceiling),
            _ => return,
        };

        let age = age_in_years(dob, self.today);
        if age > ceiling {
            debug!(path = %field.path, label, age, ceiling, "passenger over age ceiling");
            report.push(ValidationIssue::new(
                IssueKind::Business,
                "passenger_year",
                format!("{}.dob", field.path),
                format!("For {label}, the age should be less than {ceiling} years"),
            ));
        }
    }
}

/// Requires the passenger type to be one of the policy's accepted set.
///
/// An absent or non-string type is never in the set, so the whitelist
/// failure fires independently of the other passenger fields.
pub struct PassengerTypeRule {
    policy: BookingPolicy,
}

impl PassengerTypeRule {
    pub fn new(policy: BookingPolicy) -> Self {
        Self { policy }
    }
}

impl CustomRule for PassengerTypeRule {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        _params: &[String],
        _payload: &Value,
        report: &mut ValidationReport,
    ) {
        let kind = passenger_field(field, "passengerType").unwrap_or_default();
        if !self.policy.allows_passenger_type(kind) {
            report.push(ValidationIssue::new(
                IssueKind::Business,
                "passenger_type",
                format!("{}.passengerType", field.path),
                "please select a valid passenger type",
            ));
        }
    }
}

/// Requires the title prefix to be one of the policy's accepted set.
pub struct NamePrefixRule {
    policy: BookingPolicy,
}

impl NamePrefixRule {
    pub fn new(policy: BookingPolicy) -> Self {
        Self { policy }
    }
}

impl CustomRule for NamePrefixRule {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        _params: &[String],
        _payload: &Value,
        report: &mut ValidationReport,
    ) {
        let prefix = passenger_field(field, "namePrefix").unwrap_or_default();
        if !self.policy.allows_name_prefix(prefix) {
            report.push(ValidationIssue::new(
                IssueKind::Business,
                "name_prefix",
                format!("{}.namePrefix", field.path),
                "Please select a valid passenger title",
            ));
        }
    }
}

/// Requires each extra-service entry to carry `serviceId` and `quantity`.
///
/// Value checks on those keys are the `numeric` rules' concern.
pub struct ExtraServiceShapeRule;

impl CustomRule for ExtraServiceShapeRule {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        _params: &[String],
        _payload: &Value,
        report: &mut ValidationReport,
    ) {
        let shape_ok = field
            .value
            .and_then(Value::as_object)
            .is_some_and(|entry| entry.contains_key("serviceId") && entry.contains_key("quantity"));
        if !shape_ok {
            report.push(ValidationIssue::new(
                IssueKind::Business,
                "extra_services",
                field.path.as_str(),
                "Should be an array with `serviceId` and `quantity` keys",
            ));
        }
    }
}

/// Confirms the flight-search session is still valid for the route.
///
/// The only rule that calls an external collaborator. A rejected session
/// surfaces the collaborator's message verbatim; an unreachable
/// collaborator surfaces as a distinct lookup-failure issue.
pub struct SessionValidityRule {
    lookup: Arc<dyn SessionLookup>,
}

impl SessionValidityRule {
    pub fn new(lookup: Arc<dyn SessionLookup>) -> Self {
        Self { lookup }
    }
}

impl CustomRule for SessionValidityRule {
    fn check(
        &self,
        field: &ResolvedField<'_>,
        _params: &[String],
        payload: &Value,
        report: &mut ValidationReport,
    ) {
        let Some(session_id) = field.value.and_then(Value::as_str) else {
            return;
        };
        let route_id = payload
            .get("routeId")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match self.lookup.find_flight(session_id, route_id) {
            Ok(()) => {}
            Err(SessionError::Invalid(message)) => {
                report.push(ValidationIssue::new(
                    IssueKind::SessionInvalid,
                    "session_expired",
                    field.path.as_str(),
                    message,
                ));
            }
            Err(error @ SessionError::Unavailable(_)) => {
                debug!(path = %field.path, %error, "session lookup unreachable");
                report.push(ValidationIssue::new(
                    IssueKind::SessionLookupFailed,
                    "session_expired",
                    field.path.as_str(),
                    error.to_string(),
                ));
            }
        }
    }
}
