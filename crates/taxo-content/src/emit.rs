//! Output document assembly
//!
//! Rebuilds the frontmatter of a processed file (title, taxonomy codes,
//! generated tags, difficulty and the draft flag) on top of its original
//! body, and writes it to the mirrored destination path.

use crate::error::ContentError;
use std::fs;
use std::path::Path;

/// Everything needed to emit one processed document.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Title, normally the file stem.
    pub title: &'a str,
    /// Declared taxonomy codes, carried through verbatim.
    pub taxonomy_codes: &'a [String],
    /// Final tag list from resolution.
    pub tags: &'a [String],
    /// Declared difficulty values, carried through verbatim.
    pub difficulty: &'a [String],
    /// Whether the file is emitted as a draft.
    pub draft: bool,
    /// Document body, everything after the original frontmatter.
    pub body: &'a str,
}

impl Document<'_> {
    /// Render the full output document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("---\n");
        out.push_str(&format!("title: {}\n", self.title));

        out.push_str("taxonomie:\n");
        for code in self.taxonomy_codes {
            out.push_str(&format!("- {code}\n"));
        }

        out.push_str("tags:\n");
        for tag in self.tags {
            out.push_str(&format!("- {tag}\n"));
        }

        if !self.difficulty.is_empty() {
            out.push_str(&format!("difficulty: {}\n", self.difficulty.join(", ")));
        }
        if self.draft {
            out.push_str("draft: true\n");
        }

        out.push_str("---\n");
        out.push_str(self.body);
        out
    }

    /// Render and write the document, creating parent directories.
    pub fn write_to(&self, destination: &Path) -> Result<(), ContentError> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| ContentError::write(parent.to_path_buf(), e))?;
        }
        fs::write(destination, self.render())
            .map_err(|e| ContentError::write(destination.to_path_buf(), e))
    }
}
