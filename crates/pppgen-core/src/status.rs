//! Source status vocabulary.
//!
//! Statuses come from a controlled but source-dependent vocabulary. The
//! documented values get their own variants; anything else lands in
//! `Other` and classifies as active, non-blocked, non-completed.
//!
//! Matching is exact on the trimmed cell text. The vocabulary is
//! case-sensitive: folding case would merge distinct states (the `Review`
//! status vs the `Review` banner row some exports embed inline).

use serde::{Deserialize, Serialize};

/// Task status as reported by the source table
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Completed,
    CompletedPartial,
    Working,
    Committed,
    SoftCommit,
    Blocked,
    Canceled,
    Deprioritized,
    Review,
    /// Unrecognized source value, preserved verbatim
    Other(String),
}

impl Status {
    /// Parse a source cell into a status. Never fails: unknown values
    /// become `Other`.
    pub fn parse(cell: &str) -> Self {
        match cell.trim() {
            "Completed" => Status::Completed,
            "Completed - Partial" => Status::CompletedPartial,
            "Working" => Status::Working,
            "Committed" => Status::Committed,
            "Soft Commit" => Status::SoftCommit,
            "Blocked" => Status::Blocked,
            "Canceled" => Status::Canceled,
            "Deprioritized" => Status::Deprioritized,
            "Review" => Status::Review,
            other => Status::Other(other.to_string()),
        }
    }

    /// Get the source spelling of this status
    pub fn as_str(&self) -> &str {
        match self {
            Status::Completed => "Completed",
            Status::CompletedPartial => "Completed - Partial",
            Status::Working => "Working",
            Status::Committed => "Committed",
            Status::SoftCommit => "Soft Commit",
            Status::Blocked => "Blocked",
            Status::Canceled => "Canceled",
            Status::Deprioritized => "Deprioritized",
            Status::Review => "Review",
            Status::Other(s) => s,
        }
    }

    /// Fully done (partial completion still counts as active work)
    pub fn is_completed(&self) -> bool {
        matches!(self, Status::Completed)
    }

    /// Waiting on something external
    pub fn is_blocked(&self) -> bool {
        matches!(self, Status::Blocked)
    }

    /// No further work expected (done or abandoned)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Canceled)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
