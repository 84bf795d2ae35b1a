//! # pppgen-core
//!
//! Core domain model and traits for the pppgen report generator.
//!
//! This crate provides:
//! - Domain types: `TaskRecord`, `Status`, `Buckets`, `PppReport`
//! - Core traits: `Summarizer`
//! - Error types shared across the pipeline
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pppgen_core::{Status, TaskRecord};
//!
//! let task = TaskRecord::new("Migrate CRM data")
//!     .status(Status::Working)
//!     .target_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
//!     .initiative("Sales Platform")
//!     .owner("Field Ops Lead");
//!
//! assert_eq!(task.status, Status::Working);
//! ```

pub mod status;

pub use status::Status;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Task Record
// ============================================================================

/// One normalized unit of work extracted from a source row.
///
/// Dates are either a valid calendar date or explicitly absent: a cell that
/// fails to parse normalizes to `None`, never to a partial value. Records are
/// built once per report-generation call and discarded after rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task name (non-empty after trim; rows failing this never become records)
    pub name: String,
    /// Source status value
    pub status: Status,
    /// Canonical due date
    pub target_date: Option<NaiveDate>,
    /// Canonical completion date
    pub complete_date: Option<NaiveDate>,
    /// Original due date before any re-plan; display only, never classified on
    pub original_target_date: Option<NaiveDate>,
    /// Free-text grouping label (display only)
    pub initiative: Option<String>,
    /// Responsible-party label (display only)
    pub owner: Option<String>,
    /// Free-text note, shown for blocked tasks
    pub comment: Option<String>,
    /// Zero-based index of the source row this record came from
    pub row: usize,
    /// Full original header -> cell mapping, passed opaquely to the summarizer
    pub raw_fields: BTreeMap<String, String>,
}

impl TaskRecord {
    /// Create a new record with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Other(String::new()),
            target_date: None,
            complete_date: None,
            original_target_date: None,
            initiative: None,
            owner: None,
            comment: None,
            row: 0,
            raw_fields: BTreeMap::new(),
        }
    }

    /// Set the status
    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the target date
    pub fn target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Set the completion date
    pub fn complete_date(mut self, date: NaiveDate) -> Self {
        self.complete_date = Some(date);
        self
    }

    /// Set the original target date
    pub fn original_target_date(mut self, date: NaiveDate) -> Self {
        self.original_target_date = Some(date);
        self
    }

    /// Set the initiative label
    pub fn initiative(mut self, initiative: impl Into<String>) -> Self {
        self.initiative = Some(initiative.into());
        self
    }

    /// Set the owner label
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the blocked/notes comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the source row index
    pub fn row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Attach a raw source field
    pub fn raw_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.raw_fields.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Buckets
// ============================================================================

/// Report bucket a rendered line belongs to; selects the sort key and the
/// blocked/overdue annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Progress,
    Plan,
    Blocked,
    Overdue,
}

/// Classified tasks, one sequence per report bucket.
///
/// Buckets are independent views over the input, not a partition: depending
/// on policy a task may appear in more than one bucket. Each bucket preserves
/// source row order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Buckets {
    /// Completed recently
    pub progress: Vec<TaskRecord>,
    /// Active and due within the planning horizon
    pub plan: Vec<TaskRecord>,
    /// Blocked, regardless of dates
    pub blocked: Vec<TaskRecord>,
    /// Past due and still active
    pub overdue: Vec<TaskRecord>,
}

impl Buckets {
    /// Total number of bucket memberships (a task counted once per bucket)
    pub fn len(&self) -> usize {
        self.progress.len() + self.plan.len() + self.blocked.len() + self.overdue.len()
    }

    /// True if no task landed in any bucket
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Report
// ============================================================================

/// Placeholder shown when no task completed within the lookback window
pub const EMPTY_PROGRESS: &str = "No tasks completed within the last week.";
/// Placeholder shown when nothing is due within the planning horizon
pub const EMPTY_PLANS: &str = "Nothing planned for the next two months.";
/// Placeholder shown when nothing is blocked or overdue
pub const EMPTY_PROBLEMS: &str = "No blocked or overdue projects.";

/// A complete Progress/Plans/Problems report: three HTML-fragment strings.
///
/// Sections are never empty strings; a section with no tasks carries its
/// fixed placeholder sentence instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PppReport {
    /// Tasks completed within the lookback window
    pub progress: String,
    /// Tasks due within the planning horizon
    pub plans: String,
    /// Blocked tasks followed by overdue tasks
    pub problems: String,
}

// ============================================================================
// Summarization
// ============================================================================

/// External text-generation capability that distills a task's raw fields
/// into a one-line executive summary.
///
/// Injected into the renderer as an explicit dependency rather than ambient
/// global state, so tests can substitute a network-free stub. A failing or
/// absent summarizer degrades a line to its raw fields; it never fails the
/// report.
pub trait Summarizer: Send + Sync {
    /// Produce a `<b>GOAL</b>: NAME [ASSIGNEE]`-shaped line for the task
    fn summarize(&self, fields: &BTreeMap<String, String>) -> Result<String, SummaryError>;
}

/// Summarization collaborator failure; always recovered locally
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summarization backend unreachable: {0}")]
    Backend(String),

    #[error("summarization call timed out")]
    Timeout,

    #[error("summarization backend returned an empty or malformed reply")]
    Malformed,
}

// ============================================================================
// Tests
// ============================================================================
