//! Corpus traversal
//!
//! Ordered recursive discovery of the markdown files below the content
//! root, with configured folders skipped.

use crate::error::ContentError;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// The set of content files for one run.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    ignore_folders: Vec<String>,
}

impl Corpus {
    /// A corpus rooted at `root`. Fails when the root does not exist;
    /// that is the fatal tier, checked before any file processing.
    pub fn new(
        root: impl Into<PathBuf>,
        ignore_folders: Vec<String>,
    ) -> Result<Self, ContentError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ContentError::MissingRoot { path: root });
        }
        Ok(Corpus {
            root,
            ignore_folders,
        })
    }

    /// The content root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every markdown file below the root, in stable path order.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry.path()))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect();
        info!(count = files.len(), root = %self.root.display(), "discovered corpus files");
        files
    }

    /// Path of a corpus file relative to the root.
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.components().any(|part| {
            let name = part.as_os_str().to_string_lossy();
            self.ignore_folders.iter().any(|folder| folder == &name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus_with(files: &[&str], ignore: Vec<String>) -> (tempfile::TempDir, Corpus) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "---\n---\n").unwrap();
        }
        let corpus = Corpus::new(dir.path(), ignore).unwrap();
        (dir, corpus)
    }

    #[test]
    fn finds_markdown_recursively_in_order() {
        let (_dir, corpus) = corpus_with(
            &["b/two.md", "a/one.md", "a/notes.txt"],
            Vec::new(),
        );
        let files: Vec<_> = corpus
            .files()
            .iter()
            .map(|p| corpus.relative(p).to_path_buf())
            .collect();
        assert_eq!(files, vec![PathBuf::from("a/one.md"), PathBuf::from("b/two.md")]);
    }

    #[test]
    fn ignored_folders_are_skipped() {
        let (_dir, corpus) = corpus_with(
            &["keep/one.md", "schrijfwijze/skip.md"],
            vec!["schrijfwijze".to_string()],
        );
        let files = corpus.files();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep/one.md"));
    }

    #[test]
    fn missing_root_is_fatal() {
        let result = Corpus::new("/definitely/not/here", Vec::new());
        assert!(matches!(result, Err(ContentError::MissingRoot { .. })));
    }
}
