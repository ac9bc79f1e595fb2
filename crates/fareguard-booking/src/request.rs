use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use fareguard_core::{FailureEnvelope, Result, RuleSet, ValidationReport};
use fareguard_engine::{RuleRegistry, Validator, respond};

use crate::policy::BookingPolicy;
use crate::rules::{
    ExtraServiceShapeRule, NamePrefixRule, PassengerAgeRule, PassengerTypeRule,
    SessionValidityRule,
};
use crate::session::SessionLookup;

/// Declarative rule table for an inbound flight-booking request.
pub fn booking_rule_set() -> Result<RuleSet> {
    let rule_set = RuleSet::from_pairs(&[
        ("routeId", "required|min:20"),
        ("sessionId", "required|session_expired"),
        ("email", "required|email"),
        ("passengers.*.firstName", "required|regex:/[A-Z][a-zA-Z]{2,28}$/"),
        ("passengers.*.middleName", "regex:/^[a-zA-Z]{2,10}$/"),
        ("passengers.*.lastName", "required|regex:/[A-Z][a-zA-Z]{2,28}$/"),
        ("passengers.*.dob", "required|date_format:%Y-%m-%d"),
        ("passengers.*.gender", "sometimes|in:M,F,U"),
        ("passengers.*.passportNo", "sometimes"),
        ("passengers.*.passportExpiry", "sometimes|date_format:%Y-%m-%d"),
        ("travelDetails.travelBeginDate", "required|date_format:%Y-%m-%dT%H:%M:%S"),
        ("travelDetails.flightNumber", "sometimes"),
        ("travelDetails.source", "required"),
        ("travelDetails.destination", "required"),
        ("extraServices.*", "sometimes|extra_services"),
        ("extraServices.*.serviceId", "sometimes|numeric"),
        ("extraServices.*.quantity", "sometimes|numeric"),
        ("country_code", "required|regex:/^[0-9]{1,5}$/"),
        ("phone_number", "required|regex:/^[0-9]{5,15}$/"),
        ("country", "regex:/^[A-Z]{2,5}$/"),
        ("zip", "numeric"),
        ("area_code", "required|numeric"),
        ("fareType", "required|in:GDS,LCC"),
        ("passengers.*", "passenger_year|passenger_type|name_prefix"),
    ])?;

    Ok(rule_set
        .with_message(
            "country_code.regex",
            "You have entered the invalid country code",
        )
        .with_message(
            "phone_number.regex",
            "You have entered the invalid phone_number",
        )
        .with_message(
            "passengers.*.firstName.regex",
            "Passenger firstName must be a string and not exceed more than 28 characters and less 2",
        )
        .with_message(
            "passengers.*.middleName.regex",
            "Passenger middleName must be a string and not exceed more than 10 characters and less 2",
        )
        .with_message(
            "passengers.*.lastName.regex",
            "Passenger lastName must be a string and not exceed more than 28 characters and less 2",
        )
        .with_message(
            "passengers.*.dob.required",
            "Passenger date of birth is required",
        )
        .with_message(
            "passengers.*.dob.date_format",
            "Passenger date of birth must be in the format yyyy-mm-dd",
        )
        .with_message(
            "passengers.*.passportExpiry.date_format",
            "Passenger passport expiry date must be in the format yyyy-mm-dd",
        )
        .with_message(
            "travelDetails.travelBeginDate.date_format",
            "YYYY-MM-DDT00:00:00 format for the flight departure date and time (As per origin time zone)",
        )
        .with_message("fareType.in", "Fare type must be GDS or LCC."))
}

/// Validates inbound booking requests against the standard rule table.
///
/// Construction wires the policy-driven business rules into a registry
/// and compiles the table once; validation itself is per-request and
/// shares no mutable state.
pub struct BookingValidator {
    validator: Validator,
}

impl BookingValidator {
    /// Build the validator for a policy, session port, and reference
    /// date used for age calculations.
    pub fn new(
        policy: BookingPolicy,
        sessions: Arc<dyn SessionLookup>,
        today: NaiveDate,
    ) -> Result<Self> {
        let mut registry = RuleRegistry::new();
        registry.register(
            "passenger_year",
            Box::new(PassengerAgeRule::new(policy.clone(), today)),
        )?;
        registry.register(
            "passenger_type",
            Box::new(PassengerTypeRule::new(policy.clone())),
        )?;
        registry.register("name_prefix", Box::new(NamePrefixRule::new(policy)))?;
        registry.register("extra_services", Box::new(ExtraServiceShapeRule))?;
        registry.register(
            "session_expired",
            Box::new(SessionValidityRule::new(sessions)),
        )?;

        let validator = Validator::new(booking_rule_set()?, registry)?;
        Ok(Self { validator })
    }

    /// Run the full rule table and return the accumulated report.
    pub fn validate(&self, payload: &Value) -> ValidationReport {
        self.validator.validate(payload)
    }

    /// Accept the payload, or produce the failure envelope that must
    /// short-circuit downstream processing.
    pub fn check(&self, payload: &Value) -> std::result::Result<(), FailureEnvelope> {
        match respond(&self.validate(payload)) {
            None => Ok(()),
            Some(envelope) => Err(envelope),
        }
    }
}
