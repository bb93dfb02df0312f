//! Content-side errors
//!
//! Fatal IO failures on one side, per-file findings on the other. Findings
//! are data carried on the file's issue list; only IO problems become
//! `Err`.

use std::path::PathBuf;
use taxo_core::IssueKind;

/// IO-level failure while reading or writing corpus files.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The content root does not exist.
    #[error("content root {path} not found")]
    MissingRoot {
        /// The configured source directory.
        path: PathBuf,
    },

    /// A file could not be read.
    #[error("io error reading {path}: {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("io error writing {path}: {source}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Create a read error for a path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentError::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error for a path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentError::Write {
            path: path.into(),
            source,
        }
    }
}

/// A non-fatal finding about one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    /// A dynamic link points at a file that does not exist.
    BrokenLink {
        /// The link as it appears after rewriting.
        link: String,
    },
    /// An image referenced by the file was not found under the source root.
    MissingImage {
        /// The referenced image path.
        path: String,
    },
    /// Work-in-progress markers found in the body.
    WorkInProgress {
        /// The matched marker texts.
        markers: Vec<String>,
    },
}

impl ContentIssue {
    /// Classification kind for the bucket policy. Content findings are
    /// never taxonomy findings.
    #[must_use]
    pub fn kind(&self) -> IssueKind {
        IssueKind::Other
    }
}
