//! Fatal-tier errors
//!
//! Only dataset-source failures abort a run; everything per-file is data on
//! the file's error list, not an `Err`.

use std::path::PathBuf;

/// The dataset source could not be turned into an index at all.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The source file could not be read.
    #[error("dataset {path} cannot be read: {source}")]
    Unreadable {
        /// Path of the dataset source.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The source contained no data rows at all.
    #[error("dataset {path} contains no data rows")]
    Empty {
        /// Path of the dataset source.
        path: PathBuf,
    },
}
