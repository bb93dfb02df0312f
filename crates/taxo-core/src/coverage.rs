//! Coverage matrices and their slot state machine
//!
//! Each matrix cell tracks three level slots. A slot seeded `NotApplicable`
//! is absorbing: no content-driven coverage claim may ever flip it to
//! `Covered`. Seeding the same key twice reconciles permissively: a later
//! "offered" marker un-flags a `NotApplicable` seed, never the reverse.

use crate::code::{Component, Level, TaxonomyCode};
use crate::dataset::{DatasetIndex, DatasetRow, LevelMarkers};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// State of one level slot within a coverage cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// No file has covered this slot yet.
    NotYetCovered,
    /// At least one file covered this slot.
    Covered,
    /// The curriculum marks this slot not-offered. Absorbing.
    NotApplicable,
}

/// Result of a coverage update attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The update was applied (or was already applied; covering is
    /// idempotent).
    Applied,
    /// The update was refused because the slot is `NotApplicable`.
    Refused,
}

/// A three-slot coverage cell, one slot per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageCell([SlotState; 3]);

impl CoverageCell {
    /// Seed a cell from a marker triple: not-offered slots start
    /// `NotApplicable`, the rest `NotYetCovered`.
    #[must_use]
    pub fn seed(markers: &LevelMarkers) -> Self {
        let mut slots = [SlotState::NotYetCovered; 3];
        for level in Level::ALL {
            if !markers.is_offered(level) {
                slots[level.index()] = SlotState::NotApplicable;
            }
        }
        CoverageCell(slots)
    }

    /// Reconcile with a later seeding row: a slot currently `NotApplicable`
    /// becomes `NotYetCovered` when the new row offers it. Slots already
    /// `NotYetCovered` or `Covered` are never overwritten.
    pub fn reconcile(&mut self, markers: &LevelMarkers) {
        for level in Level::ALL {
            if self.0[level.index()] == SlotState::NotApplicable && markers.is_offered(level) {
                self.0[level.index()] = SlotState::NotYetCovered;
            }
        }
    }

    /// Attempt to mark a slot covered. Refused when the slot is
    /// `NotApplicable`; idempotent when already `Covered`.
    pub fn mark_covered(&mut self, level: Level) -> UpdateOutcome {
        match self.0[level.index()] {
            SlotState::NotApplicable => UpdateOutcome::Refused,
            _ => {
                self.0[level.index()] = SlotState::Covered;
                UpdateOutcome::Applied
            }
        }
    }

    /// Current state of a slot.
    #[inline]
    #[must_use]
    pub fn slot(&self, level: Level) -> SlotState {
        self.0[level.index()]
    }

    /// The three slots in level order.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[SlotState; 3] {
        &self.0
    }
}

/// One process matrix entry, keyed by process id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    /// Process display name.
    pub process_name: String,
    /// Process step display name.
    pub process_step_name: String,
    /// Per-level coverage for the process step.
    pub tc2: CoverageCell,
}

/// One subject matrix entry, keyed by `(subject id, process id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Per-level coverage for the process step within this subject.
    pub tc2: CoverageCell,
    /// Learning tasks coverage.
    pub learning_tasks: CoverageCell,
    /// Supporting information coverage.
    pub supporting_info: CoverageCell,
    /// Procedural information coverage.
    pub procedural_info: CoverageCell,
    /// Part-tasks coverage.
    pub part_tasks: CoverageCell,
}

impl SubjectEntry {
    fn seed(row: &DatasetRow) -> Self {
        SubjectEntry {
            tc2: CoverageCell::seed(&row.level_markers),
            learning_tasks: CoverageCell::seed(&row.learning_tasks),
            supporting_info: CoverageCell::seed(&row.supporting_info),
            procedural_info: CoverageCell::seed(&row.procedural_info),
            part_tasks: CoverageCell::seed(&row.part_tasks),
        }
    }

    fn reconcile(&mut self, row: &DatasetRow) {
        self.tc2.reconcile(&row.level_markers);
        self.learning_tasks.reconcile(&row.learning_tasks);
        self.supporting_info.reconcile(&row.supporting_info);
        self.procedural_info.reconcile(&row.procedural_info);
        self.part_tasks.reconcile(&row.part_tasks);
    }

    /// The cell tracking a given 4C/ID component.
    #[must_use]
    pub fn component_cell(&self, component: Component) -> &CoverageCell {
        match component {
            Component::LearningTasks => &self.learning_tasks,
            Component::SupportingInfo => &self.supporting_info,
            Component::ProceduralInfo => &self.procedural_info,
            Component::PartTasks => &self.part_tasks,
        }
    }

    fn component_cell_mut(&mut self, component: Component) -> &mut CoverageCell {
        match component {
            Component::LearningTasks => &mut self.learning_tasks,
            Component::SupportingInfo => &mut self.supporting_info,
            Component::ProceduralInfo => &mut self.procedural_info,
            Component::PartTasks => &mut self.part_tasks,
        }
    }
}

/// The two coverage matrices for one corpus pass.
///
/// Seeded once from the dataset index, mutated only by the resolver, read by
/// the report renderer at the end of the run. Owned state, never ambient.
#[derive(Debug, Default, Serialize)]
pub struct CoverageLedger {
    process: IndexMap<String, ProcessEntry>,
    subject: IndexMap<(String, String), SubjectEntry>,
}

impl CoverageLedger {
    /// Seed both matrices from every usable dataset row.
    #[must_use]
    pub fn seed(index: &DatasetIndex) -> Self {
        let mut ledger = CoverageLedger::default();
        for row in index.rows() {
            ledger
                .process
                .entry(row.process_id.clone())
                .and_modify(|entry| entry.tc2.reconcile(&row.level_markers))
                .or_insert_with(|| ProcessEntry {
                    process_name: row.process_name.clone(),
                    process_step_name: row.process_step_name.clone(),
                    tc2: CoverageCell::seed(&row.level_markers),
                });
            ledger
                .subject
                .entry((row.subject_id.clone(), row.process_id.clone()))
                .and_modify(|entry| entry.reconcile(row))
                .or_insert_with(|| SubjectEntry::seed(row));
        }
        ledger
    }

    /// Record coverage for a resolved code.
    ///
    /// Refused as a whole when the targeted process or subject `TC2` slot is
    /// `NotApplicable` (or the key is unknown); no partial cell state is
    /// ever left behind. The matching component cell is additionally marked,
    /// except where its own slot is absorbing; that slot silently stays
    /// `NotApplicable`.
    pub fn record(&mut self, code: &TaxonomyCode) -> UpdateOutcome {
        let pair = (code.subject_id.clone(), code.process_id.clone());

        let refused = match (self.process.get(&code.process_id), self.subject.get(&pair)) {
            (Some(process), Some(subject)) => {
                process.tc2.slot(code.level) == SlotState::NotApplicable
                    || subject.tc2.slot(code.level) == SlotState::NotApplicable
            }
            _ => true,
        };
        if refused {
            return UpdateOutcome::Refused;
        }

        // Both keys exist and both TC2 slots accept the update.
        if let Some(process) = self.process.get_mut(&code.process_id) {
            process.tc2.mark_covered(code.level);
        }
        if let Some(subject) = self.subject.get_mut(&pair) {
            subject.tc2.mark_covered(code.level);
            let _ = subject
                .component_cell_mut(code.component)
                .mark_covered(code.level);
        }
        UpdateOutcome::Applied
    }

    /// Process matrix entries in seed order.
    pub fn process_entries(&self) -> impl Iterator<Item = (&String, &ProcessEntry)> {
        self.process.iter()
    }

    /// Subject matrix entries in seed order.
    pub fn subject_entries(&self) -> impl Iterator<Item = (&(String, String), &SubjectEntry)> {
        self.subject.iter()
    }

    /// Look up one process entry.
    #[must_use]
    pub fn process_entry(&self, process_id: &str) -> Option<&ProcessEntry> {
        self.process.get(process_id)
    }

    /// Look up one subject entry.
    #[must_use]
    pub fn subject_entry(&self, subject_id: &str, process_id: &str) -> Option<&SubjectEntry> {
        self.subject
            .get(&(subject_id.to_string(), process_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawRecord;
    use proptest::prelude::*;

    fn level(n: u8) -> Level {
        Level::new(n).unwrap()
    }

    fn record(process_id: &str, subject_id: &str, tc2: &str) -> RawRecord {
        RawRecord {
            process_id: process_id.to_string(),
            level_markers: tc2.to_string(),
            subject_id: subject_id.to_string(),
            process_name: "Requirementanalyseproces".to_string(),
            process_step_name: "Verzamelen requirements".to_string(),
            learning_tasks: "x,x,x".to_string(),
            supporting_info: "x,X,x".to_string(),
            procedural_info: "x,x,x".to_string(),
            part_tasks: "x,x,x".to_string(),
        }
    }

    fn code(raw: &str) -> TaxonomyCode {
        TaxonomyCode::parse(raw).unwrap()
    }

    fn seeded(records: Vec<RawRecord>) -> CoverageLedger {
        CoverageLedger::seed(&DatasetIndex::load(records))
    }

    #[test]
    fn seed_marks_not_offered_slots_not_applicable() {
        let ledger = seeded(vec![record("rv", "8", "x,x,X")]);
        let entry = ledger.process_entry("rv").unwrap();
        assert_eq!(entry.tc2.slot(level(1)), SlotState::NotYetCovered);
        assert_eq!(entry.tc2.slot(level(3)), SlotState::NotApplicable);
    }

    #[test]
    fn later_offered_seed_overrides_not_applicable() {
        let ledger = seeded(vec![record("rv", "8", "x,x,X"), record("rv", "9", "x,x,x")]);
        let entry = ledger.process_entry("rv").unwrap();
        assert_eq!(entry.tc2.slot(level(3)), SlotState::NotYetCovered);
    }

    #[test]
    fn later_not_offered_seed_never_downgrades() {
        let ledger = seeded(vec![record("rv", "8", "x,x,x"), record("rv", "9", "x,x,X")]);
        let entry = ledger.process_entry("rv").unwrap();
        assert_eq!(entry.tc2.slot(level(3)), SlotState::NotYetCovered);
    }

    #[test]
    fn record_covers_process_subject_and_component() {
        let mut ledger = seeded(vec![record("rv", "8", "x,x,x")]);
        assert_eq!(ledger.record(&code("rv.1.8.LT")), UpdateOutcome::Applied);

        let process = ledger.process_entry("rv").unwrap();
        assert_eq!(process.tc2.slot(level(1)), SlotState::Covered);

        let subject = ledger.subject_entry("8", "rv").unwrap();
        assert_eq!(subject.tc2.slot(level(1)), SlotState::Covered);
        assert_eq!(subject.learning_tasks.slot(level(1)), SlotState::Covered);
        assert_eq!(
            subject.supporting_info.slot(level(1)),
            SlotState::NotYetCovered
        );
    }

    #[test]
    fn record_refuses_not_applicable_slot() {
        let mut ledger = seeded(vec![record("rv", "8", "x,x,X")]);
        assert_eq!(ledger.record(&code("rv.3.8.OI")), UpdateOutcome::Refused);

        // The refused update leaves every cell untouched.
        let process = ledger.process_entry("rv").unwrap();
        assert_eq!(process.tc2.slot(level(3)), SlotState::NotApplicable);
        let subject = ledger.subject_entry("8", "rv").unwrap();
        assert_eq!(subject.tc2.slot(level(3)), SlotState::NotApplicable);
        assert_eq!(
            subject.supporting_info.slot(level(3)),
            SlotState::NotYetCovered
        );
    }

    #[test]
    fn record_refuses_unknown_key() {
        let mut ledger = seeded(vec![record("rv", "8", "x,x,x")]);
        assert_eq!(ledger.record(&code("zz.1.8.OI")), UpdateOutcome::Refused);
    }

    #[test]
    fn record_is_idempotent() {
        let mut ledger = seeded(vec![record("rv", "8", "x,x,x")]);
        ledger.record(&code("rv.1.8.OI"));
        let snapshot = ledger.subject_entry("8", "rv").unwrap().clone();

        ledger.record(&code("rv.1.8.OI"));
        assert_eq!(ledger.subject_entry("8", "rv").unwrap(), &snapshot);
    }

    #[test]
    fn absorbing_component_cell_stays_not_applicable() {
        // Supporting information is not offered at level 2 while TC2 is.
        let mut ledger = seeded(vec![record("rv", "8", "x,x,x")]);
        assert_eq!(ledger.record(&code("rv.2.8.OI")), UpdateOutcome::Applied);

        let subject = ledger.subject_entry("8", "rv").unwrap();
        assert_eq!(subject.tc2.slot(level(2)), SlotState::Covered);
        assert_eq!(
            subject.supporting_info.slot(level(2)),
            SlotState::NotApplicable
        );
    }

    proptest! {
        /// No sequence of coverage attempts flips an absorbing slot.
        #[test]
        fn absorbing_state_survives_any_update_sequence(levels in proptest::collection::vec(1u8..=3, 0..32)) {
            let mut cell = CoverageCell::seed(&LevelMarkers::parse("x,X,x").unwrap());
            for n in levels {
                let _ = cell.mark_covered(level(n));
            }
            prop_assert_eq!(cell.slot(level(2)), SlotState::NotApplicable);
        }

        /// Covering twice is the same as covering once.
        #[test]
        fn mark_covered_idempotent(n in 1u8..=3) {
            let mut cell = CoverageCell::seed(&LevelMarkers::parse("x,x,x").unwrap());
            cell.mark_covered(level(n));
            let once = cell;
            cell.mark_covered(level(n));
            prop_assert_eq!(cell, once);
        }
    }
}
