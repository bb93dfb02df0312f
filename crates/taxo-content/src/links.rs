//! Dynamic cross-link rewriting and existence checking
//!
//! Authors link between documents with `[[...]]` links. The build strips
//! the `content/` prefix those links carry in the source tree and, unless
//! validation is skipped, checks that each target exists somewhere below
//! the content root.

use crate::error::ContentIssue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

static DYNAMIC_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[^\[\]]+\]\]").expect("dynamic link pattern is valid"));

/// Link prefixes that are passed through untouched and unvalidated.
const VALID_PREFIXES: [&str; 3] = ["https://", "http://", "tags/"];

/// Rewrite the dynamic links in one document.
///
/// Returns the rewritten content and a finding for every link whose target
/// does not exist. When `validate` is false only the rewrite happens.
#[must_use]
pub fn rewrite_dynamic_links(
    content_root: &Path,
    content: &str,
    validate: bool,
) -> (String, Vec<ContentIssue>) {
    let mut rewritten = content.to_string();
    let mut issues = Vec::new();

    for m in DYNAMIC_LINK.find_iter(content) {
        let link = m.as_str();
        let inner = link.trim_start_matches("[[").trim_end_matches("]]");

        if VALID_PREFIXES.iter().any(|prefix| inner.starts_with(prefix)) {
            continue;
        }

        let new_link = link.replace("content/", "");
        if new_link != link {
            rewritten = rewritten.replace(link, &new_link);
        }

        if validate && !link_target_exists(content_root, &new_link) {
            debug!(link = %new_link, "dynamic link target missing");
            issues.push(ContentIssue::BrokenLink {
                link: new_link.clone(),
            });
        }
    }

    (rewritten, issues)
}

/// Whether a rewritten link's target file exists below the content root.
///
/// The target is the last path segment of the link, with any `#anchor` and
/// `|label` parts stripped; a file whose name starts with that base name
/// counts as a match.
fn link_target_exists(content_root: &Path, link: &str) -> bool {
    let inner = link.trim_start_matches("[[").trim_end_matches("]]");
    let without_anchor = inner.split('#').next().unwrap_or_default();
    let without_label = without_anchor.split('|').next().unwrap_or_default().trim();
    let Some(file_name) = without_label.split('/').next_back() else {
        return false;
    };
    if file_name.is_empty() {
        return false;
    }

    WalkDir::new(content_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .any(|entry| entry.file_name().to_string_lossy().starts_with(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "x").unwrap();
        }
        dir
    }

    #[test]
    fn strips_content_prefix() {
        let dir = corpus_with(&["ontwerp/requirements.md"]);
        let (rewritten, issues) =
            rewrite_dynamic_links(dir.path(), "See [[content/ontwerp/requirements]].", true);
        assert_eq!(rewritten, "See [[ontwerp/requirements]].");
        assert!(issues.is_empty());
    }

    #[test]
    fn reports_missing_targets() {
        let dir = corpus_with(&[]);
        let (_, issues) = rewrite_dynamic_links(dir.path(), "See [[missing/page]].", true);
        assert_eq!(
            issues,
            vec![ContentIssue::BrokenLink {
                link: "[[missing/page]]".to_string()
            }]
        );
    }

    #[test]
    fn skip_flag_suppresses_validation() {
        let dir = corpus_with(&[]);
        let (_, issues) = rewrite_dynamic_links(dir.path(), "See [[missing/page]].", false);
        assert!(issues.is_empty());
    }

    #[test]
    fn whitelisted_prefixes_pass_through() {
        let dir = corpus_with(&[]);
        let content = "A [[https://example.org]] and [[tags/niveau-1]].";
        let (rewritten, issues) = rewrite_dynamic_links(dir.path(), content, true);
        assert_eq!(rewritten, content);
        assert!(issues.is_empty());
    }

    #[test]
    fn anchors_and_labels_are_ignored_for_validation() {
        let dir = corpus_with(&["ontwerp/requirements.md"]);
        let (_, issues) =
            rewrite_dynamic_links(dir.path(), "See [[ontwerp/requirements#intro|the intro]].", true);
        assert!(issues.is_empty());
    }
}
