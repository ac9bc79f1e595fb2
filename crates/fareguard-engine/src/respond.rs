use fareguard_core::{FailureEnvelope, ValidationReport};

/// Build the failure envelope for an invalid report.
///
/// Returns `None` when the report is clean so the caller proceeds with
/// the payload untouched; a `Some` envelope must short-circuit all
/// downstream processing.
pub fn respond(report: &ValidationReport) -> Option<FailureEnvelope> {
    if report.is_ok() {
        None
    } else {
        Some(FailureEnvelope::from_report(report))
    }
}
