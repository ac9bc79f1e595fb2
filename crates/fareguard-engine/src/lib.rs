//! Rule evaluation engine for Fareguard.
//!
//! Compiles a declarative [`fareguard_core::RuleSet`] into typed
//! constraints, dispatches built-in and registered custom rules over the
//! resolved field set, and renders the failure envelope.

pub mod builtin;
pub mod registry;
pub mod respond;
pub mod validator;

pub use builtin::{BuiltinRule, RuleOutcome};
pub use registry::{CustomRule, RuleRegistry};
pub use respond::respond;
pub use validator::Validator;
