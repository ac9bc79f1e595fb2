use thiserror::Error;

/// Configuration-time error raised while building a validator.
///
/// These are fatal at startup; per-request rule failures never surface
/// here, they accumulate in a [`crate::ValidationReport`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A field path could not be parsed.
    #[error("invalid field path: {0}")]
    InvalidPath(String),
    /// A rule declaration is malformed or names an unknown rule.
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    /// A rule name was registered twice.
    #[error("duplicate rule: {0}")]
    DuplicateRule(String),
}

/// Convenience alias for results returned by Fareguard crates.
pub type Result<T> = std::result::Result<T, Error>;
