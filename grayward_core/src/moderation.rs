//! Per-message moderation decisions.

use crate::scanner::extract_bracketed_ids;

/// Fixed literal that triggers the canned attachment reply instead of any
/// further processing.
pub const SOFT_TRIGGER: &str = "uwu";

/// Whether the trimmed, case-insensitive message body equals the soft
/// trigger literal.
#[must_use]
pub fn is_soft_trigger(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(SOFT_TRIGGER)
}

/// Bracketed identifiers in `text` that are present in the report snapshot,
/// in order of appearance. Non-empty result means the message must be
/// deleted before any command dispatch happens.
#[must_use]
pub fn blocked_ids(text: &str, snapshot: &[String]) -> Vec<String> {
    extract_bracketed_ids(text)
        .into_iter()
        .filter(|id| snapshot.iter().any(|banned| banned == id))
        .collect()
}
