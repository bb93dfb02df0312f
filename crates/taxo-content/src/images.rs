//! Image discovery and copying
//!
//! Images referenced from a document are copied from the source tree into
//! the build tree, preserving their relative layout. A post-pass lists
//! source images that no document referenced.

use crate::error::{ContentError, ContentIssue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

static IMAGE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[\[([^\]]+)\]\]|!\[[^\]]*\]\(([^)]+)\)").expect("image link pattern is valid")
});

/// File extensions treated as images for the unused-image scan.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Copy every image a document references from the source tree to the
/// build tree. Remote URLs are skipped; unresolvable references become
/// findings.
pub fn copy_referenced_images(
    content: &str,
    src_root: &Path,
    dest_root: &Path,
) -> Result<Vec<ContentIssue>, ContentError> {
    let mut issues = Vec::new();

    for capture in IMAGE_LINK.captures_iter(content) {
        let reference = capture
            .get(1)
            .or_else(|| capture.get(2))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if reference.is_empty()
            || reference.starts_with("http://")
            || reference.starts_with("https://")
        {
            continue;
        }

        let file_name = reference.split('/').next_back().unwrap_or(reference);
        match find_by_name(src_root, file_name) {
            Some(found) => {
                let relative = found.strip_prefix(src_root).unwrap_or(&found);
                let destination = dest_root.join(relative);
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| ContentError::write(parent.to_path_buf(), e))?;
                }
                fs::copy(&found, &destination)
                    .map_err(|e| ContentError::write(destination.clone(), e))?;
                debug!(image = %relative.display(), "copied referenced image");
            }
            None => {
                issues.push(ContentIssue::MissingImage {
                    path: reference.to_string(),
                });
            }
        }
    }

    Ok(issues)
}

/// An image present in the source tree that never made it into the build.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnusedImage {
    /// Path relative to the source root.
    pub path: PathBuf,
}

/// List source images that were never copied into the build tree.
///
/// Comparison is by file stem: a stem present under the source root but
/// absent under the build root counts as unused.
#[must_use]
pub fn find_unused_images(src_root: &Path, dest_root: &Path) -> Vec<UnusedImage> {
    let built: BTreeSet<String> = image_stems(dest_root);

    let mut unused: Vec<UnusedImage> = images_in(src_root)
        .into_iter()
        .filter(|path| {
            path.file_stem()
                .map(|stem| !built.contains(&stem.to_string_lossy().to_string()))
                .unwrap_or(false)
        })
        .map(|path| UnusedImage {
            path: path.strip_prefix(src_root).unwrap_or(&path).to_path_buf(),
        })
        .collect();
    unused.sort();
    unused
}

fn images_in(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    IMAGE_EXTENSIONS.contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .collect()
}

fn image_stems(root: &Path) -> BTreeSet<String> {
    images_in(root)
        .into_iter()
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect()
}

fn find_by_name(root: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| entry.file_name().to_string_lossy() == file_name)
        .map(|entry| entry.into_path())
}
