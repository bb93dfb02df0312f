//! Content report rendering
//!
//! Per-file results grouped into work-in-progress, failed, failed-image and
//! succeeded sections.

use crate::status::bucket_icon;
use crate::table::MarkdownTable;
use serde::Serialize;
use std::path::PathBuf;
use taxo_core::Bucket;
use taxo_content::UnusedImage;
use tracing::info;

/// One rendered row of the per-file report.
#[derive(Debug, Clone, Serialize)]
pub struct FileReportRow {
    /// Classification bucket of the file.
    pub bucket: Bucket,
    /// File name without directories.
    pub file_name: String,
    /// Path relative to the content root.
    pub path: PathBuf,
    /// Declared taxonomy codes.
    pub codes: Vec<String>,
    /// Final tag list.
    pub tags: Vec<String>,
    /// Pre-rendered issue messages.
    pub errors: Vec<String>,
}

fn file_table(rows: &[&FileReportRow]) -> String {
    let mut table = MarkdownTable::new(&["Status", "File", "Path", "Taxonomy codes", "Tags", "Errors"]);
    for row in rows {
        table.push_row(vec![
            bucket_icon(row.bucket).to_string(),
            row.file_name.clone(),
            row.path.display().to_string(),
            row.codes.join("<br>"),
            row.tags.join("<br>"),
            row.errors.join("<br>"),
        ]);
    }
    table.render()
}

fn section<'a>(rows: &'a [FileReportRow], filter: impl Fn(Bucket) -> bool) -> Vec<&'a FileReportRow> {
    let mut selected: Vec<&FileReportRow> = rows.iter().filter(|row| filter(row.bucket)).collect();
    selected.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    selected
}

/// Render the full content report document.
#[must_use]
pub fn render_content_report(rows: &[FileReportRow], unused_images: &[UnusedImage]) -> String {
    info!(files = rows.len(), "rendering content report");

    let mut out = String::new();
    out.push_str("---\ndraft: true\n---\n");

    out.push_str("## Work-in-progress files\n");
    out.push_str("The files below still contain work-in-progress items.\n\n");
    out.push_str(&file_table(&section(rows, |b| b == Bucket::WorkInProgress)));

    out.push_str("\n\n");

    out.push_str("## Failed files\n");
    out.push_str("*The files below were not processed successfully.*\n\n");
    out.push_str("❌ The file declares no taxonomy code\n");
    out.push_str("🏳️ The file declares a code that is not offered at its level\n");
    out.push_str("⚠️ The file contains errors, see the *Errors* column\n");
    out.push('\n');
    out.push_str(&file_table(&section(rows, |b| {
        matches!(b, Bucket::MissingTaxonomy | Bucket::NotNeeded | Bucket::OtherFailure)
    })));

    out.push_str("\n\n");

    out.push_str("## Unused images\n");
    out.push_str("*The images below exist in the source tree but are referenced by no file.*\n\n");
    let mut image_table = MarkdownTable::new(&["Status", "Image"]);
    for image in unused_images {
        image_table.push_row(vec!["🏳️".to_string(), image.path.display().to_string()]);
    }
    out.push_str(&image_table.render());

    out.push_str("\n\n");

    out.push_str("## Succeeded files\n");
    out.push_str("The files below were processed successfully.\n\n");
    out.push_str(&file_table(&section(rows, |b| b == Bucket::Success)));
    out
}
