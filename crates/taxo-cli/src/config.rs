//! Run configuration
//!
//! Compiled-in defaults, overridden per flag on the command line.

use std::path::PathBuf;
use taxo_core::ComponentCheck;

/// Configuration for one compile run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Content source root.
    pub source_dir: PathBuf,
    /// Build output root. Recreated at run start.
    pub build_dir: PathBuf,
    /// Curriculum dataset export.
    pub dataset_path: PathBuf,
    /// Destination of the coverage report.
    pub coverage_report_path: PathBuf,
    /// Destination of the content report.
    pub content_report_path: PathBuf,
    /// Skip existence checking of dynamic links.
    pub skip_link_check: bool,
    /// Component-to-folder mapping for the placement check; `None` leaves
    /// the check disabled.
    pub component_check: Option<ComponentCheck>,
    /// Folder names excluded from the corpus.
    pub ignore_folders: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            source_dir: PathBuf::from("content"),
            build_dir: PathBuf::from("build"),
            dataset_path: PathBuf::from("dataset.csv"),
            coverage_report_path: PathBuf::from("coverage_report.md"),
            content_report_path: PathBuf::from("content_report.md"),
            skip_link_check: false,
            component_check: None,
            ignore_folders: vec!["schrijfwijze".to_string()],
        }
    }
}
