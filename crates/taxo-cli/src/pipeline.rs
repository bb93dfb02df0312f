//! End-to-end compile pipeline
//!
//! One sequential pass: load the dataset, seed the ledger, process every
//! corpus file (mutating the ledger as a side effect), then render both
//! reports from the accumulated state.

use crate::config::RunConfig;
use crate::dataset_file;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use taxo_content::{
    copy_referenced_images, find_unused_images, find_wip_markers, rewrite_dynamic_links, Corpus,
    ContentError, ContentIssue, Document,
};
use taxo_core::{
    classify, CoverageLedger, DatasetError, DatasetIndex, FileInput, IssueKind, Resolver,
};
use taxo_report::{
    describe_content_issue, describe_resolve_error, render_content_report, render_coverage_report,
    FileReportRow,
};
use tracing::{debug, info};

/// Failure of a whole run. Per-file findings never end up here.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The dataset could not be loaded at all.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Corpus IO failure.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The build directory would clobber the source tree.
    #[error("build dir {build} overlaps source dir {source_dir}")]
    BuildDirOverlapsSource {
        /// The configured build directory.
        build: PathBuf,
        /// The configured source directory.
        source_dir: PathBuf,
    },

    /// A report could not be written.
    #[error("io error writing report {path}: {source}")]
    Report {
        /// Report destination.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
}

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of corpus files processed.
    pub files_processed: usize,
    /// Number of files emitted as drafts.
    pub drafts: usize,
    /// Number of unused images found after the pass.
    pub unused_images: usize,
}

/// Run one full compile pass.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    let records = dataset_file::load_records(&config.dataset_path)?;
    let index = DatasetIndex::load(records);
    let mut ledger = CoverageLedger::seed(&index);

    let corpus = Corpus::new(&config.source_dir, config.ignore_folders.clone())?;
    reset_build_dir(&config.source_dir, &config.build_dir)?;

    let mut resolver = Resolver::new(&index);
    if let Some(check) = &config.component_check {
        resolver = resolver.with_component_check(check.clone());
    }

    let mut rows: Vec<FileReportRow> = Vec::new();
    for path in corpus.files() {
        let row = process_file(config, &corpus, &resolver, &mut ledger, &path)?;
        rows.push(row);
    }

    let unused_images = find_unused_images(corpus.root(), &config.build_dir);

    write_report(&config.coverage_report_path, render_coverage_report(&ledger))?;
    write_report(
        &config.content_report_path,
        render_content_report(&rows, &unused_images),
    )?;

    let summary = RunSummary {
        files_processed: rows.len(),
        drafts: rows.iter().filter(|row| row.bucket.is_draft()).count(),
        unused_images: unused_images.len(),
    };
    info!(
        files = summary.files_processed,
        drafts = summary.drafts,
        "compile pass finished"
    );
    Ok(summary)
}

fn process_file(
    config: &RunConfig,
    corpus: &Corpus,
    resolver: &Resolver<'_>,
    ledger: &mut CoverageLedger,
    path: &Path,
) -> Result<FileReportRow, RunError> {
    let relative = corpus.relative(path);
    debug!(file = %relative.display(), "processing corpus file");

    let original = fs::read_to_string(path)
        .map_err(|e| ContentError::read(path.to_path_buf(), e))?;

    let (content, link_issues) =
        rewrite_dynamic_links(corpus.root(), &original, !config.skip_link_check);
    let image_issues = copy_referenced_images(&content, corpus.root(), &config.build_dir)?;

    let header = taxo_content::extract(&content);
    let wip_markers = find_wip_markers(&content);

    let resolution = resolver.resolve(
        ledger,
        FileInput {
            path: relative,
            codes: &header.taxonomy_codes,
            existing_tags: &header.tags,
        },
    );

    let mut content_issues: Vec<ContentIssue> = link_issues;
    content_issues.extend(image_issues);
    if !wip_markers.is_empty() {
        content_issues.push(ContentIssue::WorkInProgress {
            markers: wip_markers.clone(),
        });
    }

    let kinds = resolution
        .errors
        .iter()
        .map(IssueKind::from)
        .chain(content_issues.iter().map(ContentIssue::kind));
    let bucket = classify(kinds, !wip_markers.is_empty());

    let mut errors: Vec<String> = resolution.errors.iter().map(describe_resolve_error).collect();
    errors.extend(content_issues.iter().map(describe_content_issue));

    let title = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let (_, body) = taxo_content::split_frontmatter(&content);
    Document {
        title: &title,
        taxonomy_codes: &header.taxonomy_codes,
        tags: &resolution.tags,
        difficulty: &header.difficulty,
        draft: bucket.is_draft(),
        body,
    }
    .write_to(&config.build_dir.join(relative))?;

    Ok(FileReportRow {
        bucket,
        file_name: relative
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
        path: relative.to_path_buf(),
        codes: header.taxonomy_codes,
        tags: resolution.tags,
        errors,
    })
}

// The build directory is wiped before every run, so a build path that is
// the source tree (or overlaps it either way) must be rejected up front.
fn reset_build_dir(source_dir: &Path, build_dir: &Path) -> Result<(), RunError> {
    if paths_overlap(source_dir, build_dir) {
        return Err(RunError::BuildDirOverlapsSource {
            build: build_dir.to_path_buf(),
            source_dir: source_dir.to_path_buf(),
        });
    }
    if build_dir.exists() {
        fs::remove_dir_all(build_dir)
            .map_err(|e| ContentError::write(build_dir.to_path_buf(), e))?;
    }
    fs::create_dir_all(build_dir).map_err(|e| ContentError::write(build_dir.to_path_buf(), e))?;
    Ok(())
}

fn paths_overlap(source_dir: &Path, build_dir: &Path) -> bool {
    let source = normalize(source_dir);
    let build = normalize(build_dir);
    source.starts_with(&build) || build.starts_with(&source)
}

// Resolves symlinks and relative components so the overlap check compares
// real locations. A build dir that does not exist yet is normalized through
// its parent.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn write_report(path: &Path, report: String) -> Result<(), RunError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| RunError::Report {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, report).map_err(|source| RunError::Report {
        path: path.to_path_buf(),
        source,
    })
}
