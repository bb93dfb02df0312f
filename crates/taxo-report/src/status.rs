//! Status icons and issue message rendering
//!
//! The core keeps its findings as structured data; the human-readable
//! wording lives here, next to the tables that display it.

use taxo_core::{Bucket, ResolveError, SlotState};
use taxo_content::ContentIssue;

/// Icon for a coverage cell slot.
#[must_use]
pub fn slot_icon(state: SlotState) -> &'static str {
    match state {
        SlotState::Covered => "✅",
        SlotState::NotYetCovered => "⛔️",
        SlotState::NotApplicable => "🏳️",
    }
}

/// Icon for a file's classification bucket.
#[must_use]
pub fn bucket_icon(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Success => "✅",
        Bucket::WorkInProgress => "🔨",
        Bucket::MissingTaxonomy => "❌",
        Bucket::NotNeeded => "🏳️",
        Bucket::OtherFailure => "⚠️",
    }
}

/// Human-readable wording for a resolver finding.
#[must_use]
pub fn describe_resolve_error(error: &ResolveError) -> String {
    match error {
        ResolveError::MissingTaxonomyCode => "No taxonomy code declared.".to_string(),
        ResolveError::InvalidTaxonomyCode { code } => {
            format!("Invalid taxonomy code: `{code}`")
        }
        ResolveError::TaxonomyNotFound { code } => {
            format!("Taxonomy code not found in dataset: `{code}`")
        }
        ResolveError::TaxonomyNotNeeded { code } => {
            format!("Taxonomy code not offered at this level: `{code}`")
        }
        ResolveError::TaxonomyWrongComponent {
            code,
            expected_folder,
        } => {
            format!("Taxonomy code `{code}` belongs under `{expected_folder}`")
        }
    }
}

/// Human-readable wording for a content finding.
#[must_use]
pub fn describe_content_issue(issue: &ContentIssue) -> String {
    match issue {
        ContentIssue::BrokenLink { link } => format!("Dynamic link target missing: `{link}`"),
        ContentIssue::MissingImage { path } => format!("Image not found: `{path}`"),
        ContentIssue::WorkInProgress { markers } => {
            format!("Work-in-progress items found: {}", markers.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_messages_carry_the_code() {
        let msg = describe_resolve_error(&ResolveError::TaxonomyNotFound {
            code: "rv.1.99.OI".to_string(),
        });
        assert!(msg.contains("rv.1.99.OI"));
    }

    #[test]
    fn bucket_icons_are_distinct_for_failure_kinds() {
        assert_ne!(bucket_icon(Bucket::MissingTaxonomy), bucket_icon(Bucket::OtherFailure));
        assert_ne!(bucket_icon(Bucket::Success), bucket_icon(Bucket::WorkInProgress));
    }
}
