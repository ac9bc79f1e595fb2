use serde::{Deserialize, Serialize};

/// Business constants for passenger classification and titles.
///
/// Deserializable so deployments can override the defaults from a config
/// file; every lookup is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    /// Maximum age in whole years to still book as a child.
    pub child_age_ceiling: i64,
    /// Maximum age in whole years to still book as an infant.
    pub infant_age_ceiling: i64,
    /// Accepted passenger types.
    pub passenger_types: Vec<String>,
    /// Accepted title prefixes.
    pub name_prefixes: Vec<String>,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            child_age_ceiling: 12,
            infant_age_ceiling: 2,
            passenger_types: vec![
                "adult".to_string(),
                "child".to_string(),
                "infant".to_string(),
            ],
            name_prefixes: vec![
                "mr".to_string(),
                "mrs".to_string(),
                "ms".to_string(),
                "miss".to_string(),
                "dr".to_string(),
            ],
        }
    }
}

impl BookingPolicy {
    pub fn allows_passenger_type(&self, kind: &str) -> bool {
        self.passenger_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(kind))
    }

    pub fn allows_name_prefix(&self, prefix: &str) -> bool {
        self.name_prefixes
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(prefix))
    }
}
