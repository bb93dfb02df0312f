//! Content-side collaborators of the taxonomy engine
//!
//! Mechanical I/O around the core: corpus traversal, frontmatter
//! extraction, work-in-progress detection, dynamic-link rewriting, image
//! handling and output document emission. Everything here either produces
//! the inputs the resolver consumes or materialises its outputs; no
//! taxonomy semantics live in this crate.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod corpus;
pub mod emit;
pub mod error;
pub mod frontmatter;
pub mod images;
pub mod links;
pub mod wip;

pub use corpus::Corpus;
pub use emit::Document;
pub use error::{ContentError, ContentIssue};
pub use frontmatter::{extract, split_frontmatter, Frontmatter};
pub use images::{copy_referenced_images, find_unused_images, UnusedImage};
pub use links::rewrite_dynamic_links;
pub use wip::find_wip_markers;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
