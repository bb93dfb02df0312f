//! Report rendering for the content compiler
//!
//! Turns the end-of-run state, the coverage ledger and the per-file
//! results, into the two markdown report documents. All human-readable
//! wording for core findings lives here; the core only ships structured
//! data.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod content;
pub mod coverage;
pub mod status;
pub mod table;

pub use content::{render_content_report, FileReportRow};
pub use coverage::{render_coverage_report, render_process_table, render_subject_table};
pub use status::{bucket_icon, describe_content_issue, describe_resolve_error, slot_icon};
pub use table::MarkdownTable;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
