//! # pppgen-classify
//!
//! Task classification for pppgen: buckets each `TaskRecord` into zero or
//! more of Progress / Plan / Blocked / Overdue relative to a reference date.
//!
//! The two source schema variants (plain spreadsheet vs banner-prefixed
//! board export) historically carried forked, drifting rule sets. Here both
//! are presets of a single data-driven `ClassifyPolicy`: new variants are
//! configuration, not new code paths.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pppgen_classify::Classifier;
//! use pppgen_core::{Status, TaskRecord};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let tasks = vec![
//!     TaskRecord::new("Fix billing").status(Status::Blocked),
//! ];
//!
//! let buckets = Classifier::board().classify(&tasks, today);
//! assert_eq!(buckets.blocked.len(), 1);
//! ```

use chrono::{Days, NaiveDate};
use pppgen_core::{Buckets, Status, TaskRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Policy
// ============================================================================

/// How a task earns a Progress membership
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressRule {
    /// `complete_date` within `[today - lookback, today]`
    CompletionWindow,
    /// Status is Completed and `target_date` within `[today - lookback, today + horizon]`.
    /// Used by schema variants that carry only a timeline field.
    CompletedInTimeline,
}

/// Status predicate for bucket membership
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusRule {
    /// Status must be one of these
    AnyOf(Vec<Status>),
    /// Any status except these (unrecognized values are admitted)
    Excluding(Vec<Status>),
}

impl StatusRule {
    /// Does this rule admit the given status?
    pub fn admits(&self, status: &Status) -> bool {
        match self {
            StatusRule::AnyOf(allowed) => allowed.contains(status),
            StatusRule::Excluding(denied) => !denied.contains(status),
        }
    }
}

/// Rule table driving classification.
///
/// A task with an absent relevant date never matches a window-bound rule:
/// absence is not a wildcard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyPolicy {
    /// Progress membership rule
    pub progress: ProgressRule,
    /// Plan status predicate (window is always `today < target <= horizon`)
    pub plan: StatusRule,
    /// Statuses never reported as overdue (terminal or already shown elsewhere)
    pub overdue_excludes: Vec<Status>,
    /// Whether a Blocked task is kept out of Overdue so it is reported once.
    /// The source variants disagreed on this; it is an explicit switch here.
    pub overdue_excludes_blocked: bool,
    /// Days of history counted as "last week"
    pub lookback_days: u64,
    /// Days of future counted as the planning horizon ("next two months")
    pub horizon_days: u64,
}

impl ClassifyPolicy {
    /// Rules for the plain spreadsheet export: a dedicated `Complete Date`
    /// column drives Progress, Plan admits everything not terminal.
    pub fn spreadsheet() -> Self {
        Self {
            progress: ProgressRule::CompletionWindow,
            plan: StatusRule::Excluding(vec![Status::Completed, Status::Canceled]),
            overdue_excludes: vec![Status::Completed],
            overdue_excludes_blocked: true,
            lookback_days: 7,
            horizon_days: 60,
        }
    }

    /// Rules for the board export: only a timeline field exists, Plan is a
    /// closed list of active statuses, Overdue excludes everything already
    /// reported or deliberately parked.
    pub fn board() -> Self {
        Self {
            progress: ProgressRule::CompletedInTimeline,
            plan: StatusRule::AnyOf(vec![
                Status::Working,
                Status::Committed,
                Status::CompletedPartial,
            ]),
            overdue_excludes: vec![
                Status::Completed,
                Status::SoftCommit,
                Status::Deprioritized,
                Status::Canceled,
                Status::Review,
            ],
            overdue_excludes_blocked: true,
            lookback_days: 7,
            horizon_days: 60,
        }
    }

    /// Keep Blocked tasks in Overdue too (the permissive legacy behavior)
    pub fn report_blocked_as_overdue(mut self) -> Self {
        self.overdue_excludes_blocked = false;
        self
    }
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self::board()
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Applies a `ClassifyPolicy` to task records
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    pub policy: ClassifyPolicy,
}

impl Classifier {
    pub fn new(policy: ClassifyPolicy) -> Self {
        Self { policy }
    }

    /// Classifier preset for the plain spreadsheet export
    pub fn spreadsheet() -> Self {
        Self::new(ClassifyPolicy::spreadsheet())
    }

    /// Classifier preset for the board export
    pub fn board() -> Self {
        Self::new(ClassifyPolicy::board())
    }

    /// Bucket each task relative to `today`.
    ///
    /// Buckets are independent views: a task may land in several (or none).
    /// Source order is preserved within each bucket; sorting is the
    /// assembler's job.
    pub fn classify(&self, tasks: &[TaskRecord], today: NaiveDate) -> Buckets {
        let last_week = today - Days::new(self.policy.lookback_days);
        let horizon = today + Days::new(self.policy.horizon_days);

        let mut buckets = Buckets::default();
        for task in tasks {
            if self.is_progress(task, today, last_week, horizon) {
                buckets.progress.push(task.clone());
            }
            if self.is_plan(task, today, horizon) {
                buckets.plan.push(task.clone());
            }
            if task.status.is_blocked() {
                buckets.blocked.push(task.clone());
            }
            if self.is_overdue(task, today) {
                buckets.overdue.push(task.clone());
            }
        }

        debug!(
            progress = buckets.progress.len(),
            plan = buckets.plan.len(),
            blocked = buckets.blocked.len(),
            overdue = buckets.overdue.len(),
            %today,
            "classified tasks"
        );
        buckets
    }

    fn is_progress(
        &self,
        task: &TaskRecord,
        today: NaiveDate,
        last_week: NaiveDate,
        horizon: NaiveDate,
    ) -> bool {
        match self.policy.progress {
            ProgressRule::CompletionWindow => task
                .complete_date
                .is_some_and(|done| last_week <= done && done <= today),
            ProgressRule::CompletedInTimeline => {
                task.status.is_completed()
                    && task
                        .target_date
                        .is_some_and(|target| last_week <= target && target <= horizon)
            }
        }
    }

    fn is_plan(&self, task: &TaskRecord, today: NaiveDate, horizon: NaiveDate) -> bool {
        self.policy.plan.admits(&task.status)
            && task
                .target_date
                .is_some_and(|target| today < target && target <= horizon)
    }

    fn is_overdue(&self, task: &TaskRecord, today: NaiveDate) -> bool {
        if self.policy.overdue_excludes.contains(&task.status) {
            return false;
        }
        if self.policy.overdue_excludes_blocked && task.status.is_blocked() {
            return false;
        }
        task.target_date.is_some_and(|target| target <= today)
    }
}
