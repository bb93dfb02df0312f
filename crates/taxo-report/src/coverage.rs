//! Coverage report rendering
//!
//! Two tables: the process matrix (which process steps have content at
//! which level) and the subject matrix (which subject/process pairs are
//! covered per 4C/ID component).

use crate::status::slot_icon;
use crate::table::MarkdownTable;
use taxo_core::{Component, CoverageCell, CoverageLedger};
use tracing::info;

fn cell_icons(cell: &CoverageCell) -> String {
    cell.slots()
        .iter()
        .map(|state| slot_icon(*state))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the process matrix table.
#[must_use]
pub fn render_process_table(ledger: &CoverageLedger) -> String {
    let mut table = MarkdownTable::new(&["TC1", "Process", "Process step", "Level 1", "Level 2", "Level 3"]);
    for (process_id, entry) in ledger.process_entries() {
        let slots = entry.tc2.slots();
        table.push_row(vec![
            process_id.clone(),
            entry.process_name.clone(),
            entry.process_step_name.clone(),
            slot_icon(slots[0]).to_string(),
            slot_icon(slots[1]).to_string(),
            slot_icon(slots[2]).to_string(),
        ]);
    }
    table.render()
}

/// Render the subject matrix table.
#[must_use]
pub fn render_subject_table(ledger: &CoverageLedger) -> String {
    let mut table = MarkdownTable::new(&[
        "TC3",
        "TC1",
        "TC2",
        Component::LearningTasks.display_name(),
        Component::SupportingInfo.display_name(),
        Component::ProceduralInfo.display_name(),
        Component::PartTasks.display_name(),
    ]);
    for ((subject_id, process_id), entry) in ledger.subject_entries() {
        table.push_row(vec![
            subject_id.clone(),
            process_id.clone(),
            cell_icons(&entry.tc2),
            cell_icons(&entry.learning_tasks),
            cell_icons(&entry.supporting_info),
            cell_icons(&entry.procedural_info),
            cell_icons(&entry.part_tasks),
        ]);
    }
    table.render()
}

/// Render the full coverage report document.
#[must_use]
pub fn render_coverage_report(ledger: &CoverageLedger) -> String {
    info!("rendering coverage report");

    let mut out = String::new();
    out.push_str("---\ndraft: true\n---\n");

    out.push_str("## Report 1 - Process steps\n");
    out.push_str("*Goal: find process steps that have no content at all yet.*\n\n");
    out.push_str("- ✅ A file with this taxonomy code exists at this level\n");
    out.push_str("- ⛔️ No file carries this taxonomy code at this level\n");
    out.push_str("- 🏳️ The taxonomy code is not offered at this level\n");
    out.push('\n');
    out.push_str(&render_process_table(ledger));

    out.push_str("\n\n");

    out.push_str("## Report 2 - Subject catalogue\n");
    out.push_str("*Goal: subjects with their taxonomy codes, for insight into what is offered.*\n");
    out.push_str("The TC2 and component columns show one icon per level.\n\n");
    out.push_str("- ✅ The subject is offered at the indicated level\n");
    out.push_str("- ⛔️ The subject is **not** offered at the indicated level\n");
    out.push_str("- 🏳️ The subject does not need to be offered at the indicated level\n");
    out.push('\n');
    out.push_str(&render_subject_table(ledger));
    out
}
