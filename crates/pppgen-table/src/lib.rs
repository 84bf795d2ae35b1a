//! # pppgen-table
//!
//! Tabular ingestion and schema normalization for pppgen.
//!
//! This crate provides:
//! - The `Table` model: named columns over string cells
//! - CSV reading with a configurable header-row offset
//! - The schema adapter: `Table` -> `Vec<TaskRecord>`
//! - The date normalizer for single-date and multi-date "timeline" cells
//!
//! ## Example
//!
//! ```rust
//! use pppgen_table::{adapt, Table};
//!
//! let csv = "\
//! Name,Status,Timeline,Project DRI
//! Ship exporter,Working,\"3/1/2026, 3/15/2026\",Data Lead
//! ";
//!
//! let table = Table::from_csv_reader(csv.as_bytes(), 0).unwrap();
//! let tasks = adapt(&table).unwrap();
//! assert_eq!(tasks.len(), 1);
//! assert_eq!(tasks[0].owner.as_deref(), Some("Data Lead"));
//! ```

pub mod adapt;
pub mod dates;

pub use adapt::{adapt, ColumnMap, SchemaError};
pub use dates::normalize_date;

use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Ingestion error: the table could not be read at all
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("table has no header row (after skipping {0} leading rows)")]
    NoHeader(usize),
}

/// A raw tabular dataset: one header row naming columns, then data rows.
///
/// Cells are untyped strings; typing happens in the schema adapter. Rows are
/// padded or truncated to the header width so cell access never panics on
/// ragged input.
#[derive(Clone, Debug)]
pub struct Table {
    /// Column names, in source order
    pub columns: Vec<String>,
    /// Data rows, each exactly `columns.len()` cells wide
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from pre-split rows. The first row after `skip_rows`
    /// leading banner rows is the header.
    pub fn from_rows(mut raw: Vec<Vec<String>>, skip_rows: usize) -> Result<Self, TableError> {
        if raw.len() <= skip_rows {
            return Err(TableError::NoHeader(skip_rows));
        }
        let mut rest = raw.split_off(skip_rows);
        let columns: Vec<String> = rest.remove(0).iter().map(|c| c.trim().to_string()).collect();

        let width = columns.len();
        let rows = rest
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Read a table from a CSV stream, skipping `skip_rows` leading
    /// non-data rows (board title/description banners).
    pub fn from_csv_reader<R: Read>(reader: R, skip_rows: usize) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut raw = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            raw.push(record.iter().map(str::to_string).collect());
        }
        Self::from_rows(raw, skip_rows)
    }

    /// Read a table from a CSV file on disk
    pub fn from_csv_path(path: &Path, skip_rows: usize) -> Result<Self, TableError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file, skip_rows)
    }

    /// Index of a named column, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// First present column among `names`, with its index
    pub fn first_column_of(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|n| self.column_index(n))
    }

    /// Cell text at (row, column), trimmed. Empty string for out-of-range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|c| c.trim())
            .unwrap_or("")
    }
}
