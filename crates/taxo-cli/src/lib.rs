//! Command-line front end for the content compiler
//!
//! Wires the dataset loader, the corpus collaborators and the resolution
//! engine into one `taxo compile` pass. The pipeline lives in this crate
//! as a library so the integration tests can drive a full run without
//! spawning the binary.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod dataset_file;
pub mod pipeline;

pub use config::RunConfig;
pub use dataset_file::load_records;
pub use pipeline::{run, RunError, RunSummary};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
