//! Work-in-progress marker detection

use once_cell::sync::Lazy;
use regex::Regex;

/// Markers look like `-=TODO=-`.
static WIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-=[A-Z]+=-").expect("wip marker pattern is valid"));

/// All work-in-progress markers in a document, in order of appearance.
#[must_use]
pub fn find_wip_markers(content: &str) -> Vec<String> {
    WIP_PATTERN
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}
