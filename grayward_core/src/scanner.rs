//! Syntactic scan for bracketed numeric identifiers in message text.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)] // literal pattern
static BRACKETED_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Extract every digit sequence enclosed in a single pair of square brackets,
/// bracket-stripped, in order of appearance.
///
/// This is a purely syntactic scan; extracted values are not validated
/// against any identifier format beyond "digits only".
#[must_use]
pub fn extract_bracketed_ids(text: &str) -> Vec<String> {
    BRACKETED_ID
        .captures_iter(text)
        .map(|cap| cap[1].to_owned())
        .collect()
}
