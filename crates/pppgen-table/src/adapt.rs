//! Schema adapter: raw `Table` -> uniform `TaskRecord`s.
//!
//! The source vocabulary covers two export shapes: a plain spreadsheet
//! (`Project Name`, `Target Date`, `Complete Date`) and a board export
//! (`Name`, `Timeline`, banner rows repeated inline). Column resolution
//! happens once per table; rows then convert independently. Rows that are
//! not real tasks (blank name, or a repeated sub-header sentinel) are
//! dropped silently.

use pppgen_core::{Status, TaskRecord};
use thiserror::Error;
use tracing::debug;

use crate::dates::normalize_date;
use crate::Table;

/// Column names recognized for the task name
const NAME_COLUMNS: &[&str] = &["Project Name", "Name"];
/// Column names recognized for the due date
const TARGET_COLUMNS: &[&str] = &["Target Date", "Timeline"];
/// Sentinel "names" marking embedded section banners, not tasks
const SENTINEL_NAMES: &[&str] = &["Subitems", "Name", "Review", "Closed"];

/// Required columns are missing. Fatal for the whole report.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required columns: {}", missing.join(", "))]
pub struct SchemaError {
    /// Human-readable names of the absent columns
    pub missing: Vec<String>,
}

/// Resolved positions of the recognized columns in one table.
///
/// Optional columns resolve to `None` when absent, and every record from
/// that table then carries `None` in the matching field, so rendering never
/// has to guess whether an empty value means "blank cell" or "no column".
#[derive(Clone, Copy, Debug)]
pub struct ColumnMap {
    pub name: usize,
    pub status: usize,
    pub target_date: Option<usize>,
    pub complete_date: Option<usize>,
    pub original_target_date: Option<usize>,
    pub initiative: Option<usize>,
    pub owner: Option<usize>,
    pub comment: Option<usize>,
}

impl ColumnMap {
    /// Resolve the column map for a table, validating required columns.
    ///
    /// Required: a name column, `Status`, and at least one date-bearing
    /// column. The error lists every missing requirement at once.
    pub fn resolve(table: &Table) -> Result<Self, SchemaError> {
        let name = table.first_column_of(NAME_COLUMNS);
        let status = table.column_index("Status");
        let target_date = table.first_column_of(TARGET_COLUMNS);
        let complete_date = table.column_index("Complete Date");

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("Project Name/Name".to_string());
        }
        if status.is_none() {
            missing.push("Status".to_string());
        }
        if target_date.is_none() && complete_date.is_none() {
            missing.push("Target Date/Timeline".to_string());
        }
        if !missing.is_empty() {
            return Err(SchemaError { missing });
        }

        Ok(Self {
            name: name.unwrap(),
            status: status.unwrap(),
            target_date,
            complete_date,
            original_target_date: table.column_index("Original Target Date"),
            initiative: table.column_index("Corporate Initiative"),
            owner: table.column_index("Project DRI"),
            comment: table.column_index("Comments"),
        })
    }
}

/// True if this row is a real task and should become a record
fn is_task_row(name: &str) -> bool {
    !name.is_empty() && !SENTINEL_NAMES.contains(&name)
}

fn optional_cell(table: &Table, row: usize, col: Option<usize>) -> Option<String> {
    let text = table.cell(row, col?);
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn optional_date(table: &Table, row: usize, col: Option<usize>) -> Option<chrono::NaiveDate> {
    normalize_date(table.cell(row, col?))
}

/// Normalize a raw table into task records.
///
/// Validates the schema once, then converts each surviving row. Per-cell
/// date failures degrade to absent values; only missing required columns
/// fail the call.
pub fn adapt(table: &Table) -> Result<Vec<TaskRecord>, SchemaError> {
    let map = ColumnMap::resolve(table)?;

    let mut records = Vec::new();
    for row in 0..table.rows.len() {
        let name = table.cell(row, map.name);
        if !is_task_row(name) {
            debug!(row, name, "skipping non-task row");
            continue;
        }

        let status = Status::parse(table.cell(row, map.status));

        // Completion dates only mean something once the work is done;
        // an export sometimes carries a stale value in that cell.
        let complete_date = if status.is_completed() || status == Status::CompletedPartial {
            optional_date(table, row, map.complete_date)
        } else {
            None
        };

        let mut record = TaskRecord::new(name).status(status).row(row);
        record.target_date = optional_date(table, row, map.target_date);
        record.complete_date = complete_date;
        record.original_target_date = optional_date(table, row, map.original_target_date);
        record.initiative = optional_cell(table, row, map.initiative);
        record.owner = optional_cell(table, row, map.owner);
        record.comment = optional_cell(table, row, map.comment);

        for (col, header) in table.columns.iter().enumerate() {
            let cell = table.cell(row, col);
            if !header.is_empty() && !cell.is_empty() {
                record.raw_fields.insert(header.clone(), cell.to_string());
            }
        }

        records.push(record);
    }

    debug!(
        rows = table.rows.len(),
        tasks = records.len(),
        "adapted table"
    );
    Ok(records)
}
