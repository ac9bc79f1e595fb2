//! Flight-booking rule set for the Fareguard engine.
//!
//! Carries the declarative rule table for inbound booking requests, the
//! cross-field business rules (passenger age/type/title, extra-service
//! shape, session validity), the booking policy constants, and the
//! session-lookup port.

pub mod age;
pub mod policy;
pub mod request;
pub mod rules;
pub mod session;

pub use age::age_in_years;
pub use policy::BookingPolicy;
pub use request::{BookingValidator, booking_rule_set};
pub use session::{PermissiveSessions, SessionError, SessionLookup, SessionSnapshot};
