use std::collections::HashMap;

use thiserror::Error;

/// Failure reported by the flight-search session collaborator.
///
/// A rejected session and an unreachable collaborator are distinct
/// outcomes and must never be merged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The service answered and rejected the session; the message is
    /// surfaced to the caller verbatim.
    #[error("{0}")]
    Invalid(String),
    /// The service could not answer (network, timeout, internal fault).
    #[error("session lookup failed: {0}")]
    Unavailable(String),
}

/// Port to the external flight-search session service.
pub trait SessionLookup: Send + Sync {
    /// Confirm that `session_id` still holds a flight search for
    /// `route_id`.
    fn find_flight(&self, session_id: &str, route_id: &str) -> Result<(), SessionError>;
}

/// Lookup that accepts every session.
///
/// Used when no session source is configured, so format and business
/// rules can run standalone.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveSessions;

impl SessionLookup for PermissiveSessions {
    fn find_flight(&self, _session_id: &str, _route_id: &str) -> Result<(), SessionError> {
        Ok(())
    }
}

/// In-memory snapshot of live sessions keyed by session id.
#[derive(Debug, Default, Clone)]
pub struct SessionSnapshot {
    routes: HashMap<String, String>,
}

impl SessionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(routes: HashMap<String, String>) -> Self {
        Self { routes }
    }

    pub fn insert(&mut self, session_id: &str, route_id: &str) {
        self.routes
            .insert(session_id.to_string(), route_id.to_string());
    }
}

impl SessionLookup for SessionSnapshot {
    fn find_flight(&self, session_id: &str, route_id: &str) -> Result<(), SessionError> {
        match self.routes.get(session_id) {
            None => Err(SessionError::Invalid(
                "The session has expired for the requested route".to_string(),
            )),
            Some(expected) if expected != route_id => Err(SessionError::Invalid(format!(
                "The session does not belong to route '{route_id}'"
            ))),
            Some(_) => Ok(()),
        }
    }
}
