//! Taxonomy resolution and coverage aggregation engine
//!
//! The core of the content compiler: validates taxonomy codes declared in
//! content files against the curriculum dataset, derives descriptive tags,
//! records coverage in two aggregate matrices, and classifies each file for
//! reporting.
//!
//! # Flow
//!
//! ```text
//! dataset records → DatasetIndex → CoverageLedger (seeded once)
//!                                        ↑ mutated per file
//! declared codes → Resolver::resolve → Resolution {tags, errors} → classify → Bucket
//! ```
//!
//! The ledger is explicit owned state: it is constructed at run start,
//! passed by mutable reference into the resolver, and handed to the report
//! renderer at run end.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod classify;
pub mod code;
pub mod coverage;
pub mod dataset;
pub mod error;
pub mod resolve;

pub use classify::{classify, Bucket, IssueKind};
pub use code::{Component, InvalidCode, Level, TaxonomyCode};
pub use coverage::{CoverageCell, CoverageLedger, ProcessEntry, SlotState, SubjectEntry, UpdateOutcome};
pub use dataset::{Applicability, DatasetIndex, DatasetRow, LevelMarkers, RawRecord};
pub use error::DatasetError;
pub use resolve::{ComponentCheck, FileInput, Resolution, ResolveError, Resolver, LEVEL_TAG_PREFIX};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports.
pub mod prelude {
    //! Common imports for driving the engine.
    pub use crate::classify::{classify, Bucket, IssueKind};
    pub use crate::code::{Component, Level, TaxonomyCode};
    pub use crate::coverage::{CoverageLedger, SlotState, UpdateOutcome};
    pub use crate::dataset::{DatasetIndex, RawRecord};
    pub use crate::error::DatasetError;
    pub use crate::resolve::{ComponentCheck, FileInput, Resolution, ResolveError, Resolver};
}
