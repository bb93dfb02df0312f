//! Per-file tag and error resolution
//!
//! The resolver consumes one file's declared codes plus its existing tags,
//! drives the code parser and dataset index, mutates the coverage ledger,
//! and returns the final tag list and error list for that file.

use crate::code::{Component, TaxonomyCode};
use crate::coverage::{CoverageLedger, UpdateOutcome};
use crate::dataset::DatasetIndex;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Prefix of generated level tags. Level tags sort before all other tags in
/// the final ordering.
pub const LEVEL_TAG_PREFIX: &str = "niveau-";

/// A per-file resolution failure. Structured data only; human-readable
/// rendering lives with the report formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolveError {
    /// The file declared no taxonomy codes at all.
    MissingTaxonomyCode,
    /// A declared code failed the lexical gate.
    InvalidTaxonomyCode {
        /// The raw declared string.
        code: String,
    },
    /// A well-formed code matched no dataset row.
    TaxonomyNotFound {
        /// The offending code.
        code: String,
    },
    /// The curriculum states the code should not be offered at its level.
    TaxonomyNotNeeded {
        /// The offending code.
        code: String,
    },
    /// The file does not live in the folder its component implies.
    TaxonomyWrongComponent {
        /// The offending code.
        code: String,
        /// The folder the component maps to.
        expected_folder: String,
    },
}

impl ResolveError {
    /// Stable category identifier, as consumed by downstream formatters.
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            ResolveError::MissingTaxonomyCode => "MissingTaxonomyCode",
            ResolveError::InvalidTaxonomyCode { .. } => "InvalidTaxonomyCode",
            ResolveError::TaxonomyNotFound { .. } => "TaxonomyNotFound",
            ResolveError::TaxonomyNotNeeded { .. } => "TaxonomyNotNeeded",
            ResolveError::TaxonomyWrongComponent { .. } => "TaxonomyWrongComponent",
        }
    }
}

/// Optional placement check: each 4C/ID component maps to the folder its
/// content is expected to live under.
#[derive(Debug, Clone)]
pub struct ComponentCheck {
    folders: IndexMap<Component, String>,
}

impl ComponentCheck {
    /// The standard mapping, using the component display names as folders.
    #[must_use]
    pub fn standard() -> Self {
        let mut folders = IndexMap::new();
        for component in Component::ALL {
            folders.insert(component, component.display_name().to_string());
        }
        ComponentCheck { folders }
    }

    /// Override the folder for one component.
    #[must_use]
    pub fn with_folder(mut self, component: Component, folder: impl Into<String>) -> Self {
        self.folders.insert(component, folder.into());
        self
    }

    /// The folder a component maps to.
    #[must_use]
    pub fn expected_folder(&self, component: Component) -> &str {
        self.folders
            .get(&component)
            .map(String::as_str)
            .unwrap_or_else(|| component.display_name())
    }

    /// Whether any directory component of `path` matches the expected
    /// folder.
    #[must_use]
    pub fn matches(&self, path: &Path, component: Component) -> bool {
        let expected = self.expected_folder(component);
        path.components()
            .any(|part| part.as_os_str().to_string_lossy() == expected)
    }
}

/// Everything the resolver needs to know about one file.
#[derive(Debug, Clone, Copy)]
pub struct FileInput<'a> {
    /// Path of the file, relative to the content root.
    pub path: &'a Path,
    /// Declared taxonomy codes, in declaration order.
    pub codes: &'a [String],
    /// Caller-supplied tags already present in the file.
    pub existing_tags: &'a [String],
}

/// The per-file outcome: ordered deduplicated tags and ordered errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Final tag list, level tags first.
    pub tags: Vec<String>,
    /// Every per-code failure, in detection order.
    pub errors: Vec<ResolveError>,
}

/// Resolves declared codes against the dataset and records coverage.
#[derive(Debug)]
pub struct Resolver<'a> {
    index: &'a DatasetIndex,
    component_check: Option<ComponentCheck>,
}

impl<'a> Resolver<'a> {
    /// A resolver over the given dataset index, with the placement check
    /// disabled.
    #[must_use]
    pub fn new(index: &'a DatasetIndex) -> Self {
        Resolver {
            index,
            component_check: None,
        }
    }

    /// Enable the component/folder placement check.
    #[must_use]
    pub fn with_component_check(mut self, check: ComponentCheck) -> Self {
        self.component_check = Some(check);
        self
    }

    /// Resolve one file.
    ///
    /// Walks the declared codes in order, accumulates tags and errors, and
    /// records coverage in `ledger` for every applicable code. The returned
    /// tag list is `existing_tags` plus generated tags, stable-sorted so
    /// level tags come first, deduplicated by first occurrence.
    pub fn resolve(&self, ledger: &mut CoverageLedger, input: FileInput<'_>) -> Resolution {
        let mut tags: Vec<String> = Vec::new();
        let mut errors: Vec<ResolveError> = Vec::new();

        if input.codes.is_empty() {
            errors.push(ResolveError::MissingTaxonomyCode);
        } else {
            for raw in input.codes {
                self.resolve_code(ledger, input.path, raw, &mut tags, &mut errors);
            }
            // Second safety net: a non-empty code list that produced neither
            // tags nor errors still counts as unresolved.
            if tags.is_empty() && errors.is_empty() {
                errors.push(ResolveError::TaxonomyNotFound {
                    code: input.codes[0].clone(),
                });
            }
        }

        Resolution {
            tags: order_tags(input.existing_tags, tags),
            errors,
        }
    }

    fn resolve_code(
        &self,
        ledger: &mut CoverageLedger,
        path: &Path,
        raw: &str,
        tags: &mut Vec<String>,
        errors: &mut Vec<ResolveError>,
    ) {
        debug!(code = raw, "resolving taxonomy code");

        let code = match TaxonomyCode::parse(raw) {
            Ok(code) => code,
            Err(invalid) => {
                errors.push(ResolveError::InvalidTaxonomyCode { code: invalid.raw });
                return;
            }
        };

        let rows = self.index.by_subject(&code.subject_id, &code.process_id);
        if rows.is_empty() {
            errors.push(ResolveError::TaxonomyNotFound {
                code: raw.to_string(),
            });
            return;
        }

        for row in rows {
            push_unique(tags, format!("{LEVEL_TAG_PREFIX}{}", code.level));
            push_unique(tags, row.process_name.clone());
            push_unique(tags, row.process_step_name.clone());
            push_unique(tags, row.subject_id.clone());

            // The curriculum row is authoritative: a not-offered level turns
            // the coverage claim into a "not needed" finding.
            if !row.level_markers.is_offered(code.level) {
                errors.push(ResolveError::TaxonomyNotNeeded {
                    code: raw.to_string(),
                });
                continue;
            }

            if let Some(check) = &self.component_check {
                if !check.matches(path, code.component) {
                    errors.push(ResolveError::TaxonomyWrongComponent {
                        code: raw.to_string(),
                        expected_folder: check.expected_folder(code.component).to_string(),
                    });
                    continue;
                }
            }

            // The absorbing-state guard inside the ledger remains
            // authoritative even after the row-level check above.
            if ledger.record(&code) == UpdateOutcome::Refused {
                errors.push(ResolveError::TaxonomyNotNeeded {
                    code: raw.to_string(),
                });
            }
        }
    }
}

/// Concatenate existing and generated tags, stable-sort level tags to the
/// front (lexicographic within each group), and deduplicate keeping the
/// first occurrence.
fn order_tags(existing: &[String], generated: Vec<String>) -> Vec<String> {
    let mut combined: Vec<String> = existing.to_vec();
    combined.extend(generated);
    combined.sort_by(|a, b| {
        (!a.starts_with(LEVEL_TAG_PREFIX), a).cmp(&(!b.starts_with(LEVEL_TAG_PREFIX), b))
    });

    let mut deduped: Vec<String> = Vec::with_capacity(combined.len());
    for tag in combined {
        if !deduped.contains(&tag) {
            deduped.push(tag);
        }
    }
    deduped
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}
