//! Dataset file loading
//!
//! The curriculum table arrives as a semicolon-delimited export. This
//! loader is the tabular collaborator of the engine: it reads the file,
//! skips the header row, and hands pre-split records to the index. Row
//! validation itself is the index's job.

use std::fs;
use std::path::Path;
use taxo_core::{DatasetError, RawRecord};
use tracing::info;

// Column positions within the exported table. Column 0 and 6 are unused
// presentation columns.
const TC1_COL: usize = 1;
const TC2_COL: usize = 2;
const PROCESS_COL: usize = 3;
const PROCESS_STEP_COL: usize = 4;
const TC3_COL: usize = 5;
const LT_COL: usize = 7;
const OI_COL: usize = 8;
const PI_COL: usize = 9;
const DT_COL: usize = 10;

/// Load the raw records from a dataset export, header row excluded.
///
/// Fails only when the file cannot be read or holds no data rows at all;
/// incomplete individual rows are dropped later, during indexing.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<RawRecord> = text
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect();

    if records.is_empty() {
        return Err(DatasetError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(rows = records.len(), path = %path.display(), "loaded dataset records");
    Ok(records)
}

fn parse_line(line: &str) -> RawRecord {
    let columns: Vec<&str> = line.split(';').collect();
    let column = |idx: usize| columns.get(idx).map(|c| c.trim().to_string()).unwrap_or_default();

    RawRecord {
        process_id: column(TC1_COL),
        level_markers: column(TC2_COL),
        subject_id: column(TC3_COL),
        process_name: column(PROCESS_COL),
        process_step_name: column(PROCESS_STEP_COL),
        learning_tasks: column(LT_COL),
        supporting_info: column(OI_COL),
        procedural_info: column(PI_COL),
        part_tasks: column(DT_COL),
    }
}
