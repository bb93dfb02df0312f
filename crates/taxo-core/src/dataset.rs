//! Curriculum dataset rows and lookup index
//!
//! The dataset is the read-only reference the whole run is measured against.
//! It is loaded once from pre-split records, incomplete records are dropped
//! on the way in, and the resulting [`DatasetIndex`] is immutable for the
//! rest of the run.

use crate::code::Level;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Whether a process/subject/component is offered at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Applicability {
    /// The curriculum offers this at the level.
    Offered,
    /// The curriculum explicitly does not offer this at the level.
    NotOffered,
}

/// A per-level applicability triple, parsed from a marker string such as
/// `x,x,X` where the literal `X` means not-offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMarkers([Applicability; 3]);

impl LevelMarkers {
    /// Parse a comma-separated marker triple. Returns `None` when fewer than
    /// three markers are present; the record is then treated as incomplete.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut markers = [Applicability::Offered; 3];
        let mut parts = raw.split(',');
        for slot in &mut markers {
            let part = parts.next()?;
            *slot = if part.trim() == "X" {
                Applicability::NotOffered
            } else {
                Applicability::Offered
            };
        }
        Some(LevelMarkers(markers))
    }

    /// Applicability at a level.
    #[inline]
    #[must_use]
    pub fn at(&self, level: Level) -> Applicability {
        self.0[level.index()]
    }

    /// Convenience check for the offered state.
    #[inline]
    #[must_use]
    pub fn is_offered(&self, level: Level) -> bool {
        self.at(level) == Applicability::Offered
    }
}

/// A raw dataset record as handed over by the tabular loader: the nine
/// required columns, still unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Primary process identifier (TC1).
    pub process_id: String,
    /// Level applicability markers for the process step (TC2).
    pub level_markers: String,
    /// Subject identifier (TC3).
    pub subject_id: String,
    /// Process display name.
    pub process_name: String,
    /// Process step display name.
    pub process_step_name: String,
    /// Learning tasks applicability markers.
    pub learning_tasks: String,
    /// Supporting information applicability markers.
    pub supporting_info: String,
    /// Procedural information applicability markers.
    pub procedural_info: String,
    /// Part-tasks applicability markers.
    pub part_tasks: String,
}

impl RawRecord {
    fn has_empty_field(&self) -> bool {
        [
            &self.process_id,
            &self.level_markers,
            &self.subject_id,
            &self.process_name,
            &self.process_step_name,
            &self.learning_tasks,
            &self.supporting_info,
            &self.procedural_info,
            &self.part_tasks,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

/// One validated curriculum entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    /// Primary process identifier (TC1).
    pub process_id: String,
    /// Level applicability for the process step (TC2).
    pub level_markers: LevelMarkers,
    /// Subject identifier (TC3).
    pub subject_id: String,
    /// Process display name.
    pub process_name: String,
    /// Process step display name.
    pub process_step_name: String,
    /// Learning tasks applicability.
    pub learning_tasks: LevelMarkers,
    /// Supporting information applicability.
    pub supporting_info: LevelMarkers,
    /// Procedural information applicability.
    pub procedural_info: LevelMarkers,
    /// Part-tasks applicability.
    pub part_tasks: LevelMarkers,
}

impl DatasetRow {
    /// Validate a raw record into a row. Records with an empty required
    /// field or an unparseable marker triple are rejected.
    #[must_use]
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        if record.has_empty_field() {
            return None;
        }
        Some(DatasetRow {
            process_id: record.process_id.trim().to_string(),
            level_markers: LevelMarkers::parse(&record.level_markers)?,
            subject_id: record.subject_id.trim().to_string(),
            process_name: record.process_name.trim().to_string(),
            process_step_name: record.process_step_name.trim().to_string(),
            learning_tasks: LevelMarkers::parse(&record.learning_tasks)?,
            supporting_info: LevelMarkers::parse(&record.supporting_info)?,
            procedural_info: LevelMarkers::parse(&record.procedural_info)?,
            part_tasks: LevelMarkers::parse(&record.part_tasks)?,
        })
    }
}

/// Immutable lookup index over the validated dataset rows.
///
/// Lookup misses return empty results, never errors: the reference table is
/// allowed to be sparse relative to what content declares.
#[derive(Debug, Default)]
pub struct DatasetIndex {
    rows: Vec<DatasetRow>,
    by_process: IndexMap<String, Vec<usize>>,
    by_pair: IndexMap<(String, String), Vec<usize>>,
}

impl DatasetIndex {
    /// Build the index from loader records, dropping incomplete ones.
    #[must_use]
    pub fn load(records: impl IntoIterator<Item = RawRecord>) -> Self {
        let mut index = DatasetIndex::default();
        for record in records {
            match DatasetRow::from_record(&record) {
                Some(row) => index.insert(row),
                None => {
                    warn!(process_id = %record.process_id, "dropping incomplete dataset record");
                }
            }
        }
        index
    }

    fn insert(&mut self, row: DatasetRow) {
        let idx = self.rows.len();
        self.by_process
            .entry(row.process_id.clone())
            .or_default()
            .push(idx);
        self.by_pair
            .entry((row.subject_id.clone(), row.process_id.clone()))
            .or_default()
            .push(idx);
        self.rows.push(row);
    }

    /// All validated rows, in load order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Rows matching a process identifier.
    #[must_use]
    pub fn by_process(&self, process_id: &str) -> Vec<&DatasetRow> {
        self.by_process
            .get(process_id)
            .map(|indices| indices.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }

    /// Rows matching a `(subject, process)` pair exactly.
    #[must_use]
    pub fn by_subject(&self, subject_id: &str, process_id: &str) -> Vec<&DatasetRow> {
        self.by_pair
            .get(&(subject_id.to_string(), process_id.to_string()))
            .map(|indices| indices.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }

    /// Number of usable rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no usable rows were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(process_id: &str, subject_id: &str, tc2: &str) -> RawRecord {
        RawRecord {
            process_id: process_id.to_string(),
            level_markers: tc2.to_string(),
            subject_id: subject_id.to_string(),
            process_name: "Requirementanalyseproces".to_string(),
            process_step_name: "Verzamelen requirements".to_string(),
            learning_tasks: "x,x,x".to_string(),
            supporting_info: "x,x,X".to_string(),
            procedural_info: "x,x,x".to_string(),
            part_tasks: "X,x,x".to_string(),
        }
    }

    #[test]
    fn markers_parse_offered_and_not_offered() {
        let markers = LevelMarkers::parse("x,x,X").unwrap();
        assert!(markers.is_offered(Level::new(1).unwrap()));
        assert!(markers.is_offered(Level::new(2).unwrap()));
        assert!(!markers.is_offered(Level::new(3).unwrap()));
    }

    #[test]
    fn markers_reject_short_triples() {
        assert!(LevelMarkers::parse("x,x").is_none());
        assert!(LevelMarkers::parse("").is_none());
    }

    #[test]
    fn load_indexes_by_process_and_pair() {
        let index = DatasetIndex::load(vec![
            record("rv", "8", "x,x,X"),
            record("rv", "9", "x,x,x"),
            record("pu", "8", "x,X,x"),
        ]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.by_process("rv").len(), 2);
        assert_eq!(index.by_subject("8", "rv").len(), 1);
        assert_eq!(index.by_subject("8", "pu").len(), 1);
    }

    #[test]
    fn lookup_miss_is_empty_not_error() {
        let index = DatasetIndex::load(vec![record("rv", "8", "x,x,x")]);
        assert!(index.by_process("zz").is_empty());
        assert!(index.by_subject("8", "zz").is_empty());
        assert!(index.by_subject("99", "rv").is_empty());
    }

    #[test]
    fn incomplete_records_are_dropped() {
        let mut incomplete = record("rv", "8", "x,x,x");
        incomplete.process_step_name = String::new();
        let index = DatasetIndex::load(vec![incomplete, record("pu", "8", "x,x,x")]);
        assert_eq!(index.len(), 1);
        assert!(index.by_process("rv").is_empty());
    }

    #[test]
    fn malformed_marker_triple_drops_record() {
        let mut bad = record("rv", "8", "x");
        bad.level_markers = "x".to_string();
        let index = DatasetIndex::load(vec![bad]);
        assert!(index.is_empty());
    }
}
