//! File classification policy
//!
//! Maps a file's accumulated issues to the report bucket it lands in.

use crate::resolve::ResolveError;
use serde::Serialize;

/// Coarse issue category used for classification. Collaborator failures
/// that are not taxonomy findings (broken links, missing images) enter as
/// [`IssueKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// No taxonomy code declared.
    MissingCode,
    /// Malformed code.
    InvalidCode,
    /// Code not present in the dataset.
    NotFound,
    /// Code valid but not offered at its level.
    NotNeeded,
    /// Code declared in the wrong component folder.
    WrongComponent,
    /// Any non-taxonomy failure.
    Other,
}

impl From<&ResolveError> for IssueKind {
    fn from(error: &ResolveError) -> Self {
        match error {
            ResolveError::MissingTaxonomyCode => IssueKind::MissingCode,
            ResolveError::InvalidTaxonomyCode { .. } => IssueKind::InvalidCode,
            ResolveError::TaxonomyNotFound { .. } => IssueKind::NotFound,
            ResolveError::TaxonomyNotNeeded { .. } => IssueKind::NotNeeded,
            ResolveError::TaxonomyWrongComponent { .. } => IssueKind::WrongComponent,
        }
    }
}

/// Report bucket for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bucket {
    /// No issues at all.
    Success,
    /// Work-in-progress markers present; overrides every error.
    WorkInProgress,
    /// The file declared no taxonomy code.
    MissingTaxonomy,
    /// At least one code is valid but not offered at its level.
    NotNeeded,
    /// Any other failure.
    OtherFailure,
}

impl Bucket {
    /// Whether files in this bucket are emitted as drafts.
    #[must_use]
    pub fn is_draft(self) -> bool {
        self != Bucket::Success
    }
}

/// Classify one file from its issue kinds and its work-in-progress flag.
///
/// Precedence: work-in-progress markers win outright, then a missing code,
/// then any not-needed finding, then any remaining issue; a file with no
/// issues is a success.
pub fn classify(kinds: impl IntoIterator<Item = IssueKind>, has_wip_markers: bool) -> Bucket {
    if has_wip_markers {
        return Bucket::WorkInProgress;
    }

    let kinds: Vec<IssueKind> = kinds.into_iter().collect();
    if kinds.contains(&IssueKind::MissingCode) {
        Bucket::MissingTaxonomy
    } else if kinds.contains(&IssueKind::NotNeeded) {
        Bucket::NotNeeded
    } else if !kinds.is_empty() {
        Bucket::OtherFailure
    } else {
        Bucket::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_issues_is_success() {
        assert_eq!(classify([], false), Bucket::Success);
    }

    #[test]
    fn wip_markers_win_over_every_error() {
        assert_eq!(classify([IssueKind::NotFound], true), Bucket::WorkInProgress);
        assert_eq!(
            classify([IssueKind::MissingCode], true),
            Bucket::WorkInProgress
        );
        assert_eq!(classify([], true), Bucket::WorkInProgress);
    }

    #[test]
    fn missing_code_beats_not_needed() {
        assert_eq!(
            classify([IssueKind::NotNeeded, IssueKind::MissingCode], false),
            Bucket::MissingTaxonomy
        );
    }

    #[test]
    fn not_needed_beats_other_errors() {
        assert_eq!(
            classify([IssueKind::InvalidCode, IssueKind::NotNeeded], false),
            Bucket::NotNeeded
        );
    }

    #[test]
    fn remaining_errors_are_other_failures() {
        assert_eq!(classify([IssueKind::NotFound], false), Bucket::OtherFailure);
        assert_eq!(classify([IssueKind::Other], false), Bucket::OtherFailure);
        assert_eq!(
            classify([IssueKind::WrongComponent], false),
            Bucket::OtherFailure
        );
    }

    #[test]
    fn only_success_is_not_draft() {
        assert!(!Bucket::Success.is_draft());
        assert!(Bucket::WorkInProgress.is_draft());
        assert!(Bucket::MissingTaxonomy.is_draft());
        assert!(Bucket::NotNeeded.is_draft());
        assert!(Bucket::OtherFailure.is_draft());
    }
}
