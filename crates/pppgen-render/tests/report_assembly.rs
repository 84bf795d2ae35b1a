//! End-to-end assembly over classified buckets.

use chrono::NaiveDate;
use pppgen_core::{
    Buckets, Status, Summarizer, SummaryError, TaskRecord, EMPTY_PLANS, EMPTY_PROBLEMS,
    EMPTY_PROGRESS,
};
use pppgen_render::{assemble, LineRenderer};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn all_sections_empty_yields_placeholders() {
    let report = assemble(&Buckets::default(), &LineRenderer::new());
    assert_eq!(report.progress, EMPTY_PROGRESS);
    assert_eq!(report.plans, EMPTY_PLANS);
    assert_eq!(report.problems, EMPTY_PROBLEMS);
}

#[test]
fn problems_blends_blocked_then_overdue_sorted_by_date() {
    let buckets = Buckets {
        blocked: vec![TaskRecord::new("stuck")
            .status(Status::Blocked)
            .target_date(date(2026, 2, 20))
            .comment("vendor outage")
            .row(3)],
        overdue: vec![
            TaskRecord::new("very late")
                .status(Status::Working)
                .target_date(date(2026, 1, 10))
                .row(1),
            TaskRecord::new("late")
                .status(Status::Working)
                .target_date(date(2026, 2, 25))
                .row(2),
        ],
        ..Buckets::default()
    };

    let report = assemble(&buckets, &LineRenderer::new());

    let very_late = report.problems.find("very late").unwrap();
    let stuck = report.problems.find("stuck").unwrap();
    let late = report.problems.find("<span class='date'>2/25</span>").unwrap();
    assert!(very_late < stuck && stuck < late);

    assert!(report.problems.contains("(vendor outage)"));
    assert!(report.problems.contains("(overdue)"));
    assert!(report.problems.ends_with("<br><br>"));
}

#[test]
fn blocked_and_overdue_with_equal_dates_keep_blocked_first() {
    let same_day = date(2026, 2, 20);
    let buckets = Buckets {
        blocked: vec![TaskRecord::new("blocked-one")
            .status(Status::Blocked)
            .target_date(same_day)
            .row(9)],
        overdue: vec![TaskRecord::new("overdue-one")
            .status(Status::Working)
            .target_date(same_day)
            .row(1)],
        ..Buckets::default()
    };

    let report = assemble(&buckets, &LineRenderer::new());
    let blocked_at = report.problems.find("blocked-one").unwrap();
    let overdue_at = report.problems.find("overdue-one").unwrap();
    assert!(blocked_at < overdue_at);
}

#[test]
fn progress_sorts_on_completion_date() {
    let buckets = Buckets {
        progress: vec![
            TaskRecord::new("second")
                .status(Status::Completed)
                .complete_date(date(2026, 2, 27)),
            TaskRecord::new("first")
                .status(Status::Completed)
                .complete_date(date(2026, 2, 24)),
        ],
        ..Buckets::default()
    };

    let report = assemble(&buckets, &LineRenderer::new());
    let first = report.progress.find("first").unwrap();
    let second = report.progress.find("second").unwrap();
    assert!(first < second);
}

struct EchoSummarizer;

impl Summarizer for EchoSummarizer {
    fn summarize(&self, fields: &BTreeMap<String, String>) -> Result<String, SummaryError> {
        let name = fields.get("Name").cloned().unwrap_or_default();
        Ok(format!("<b>Summarized</b>: {name}"))
    }
}

#[test]
fn summarized_report_uses_collaborator_lines() {
    let buckets = Buckets {
        plan: vec![TaskRecord::new("Ship exporter")
            .status(Status::Working)
            .target_date(date(2026, 3, 20))
            .initiative("Data")
            .raw_field("Name", "Ship exporter")],
        ..Buckets::default()
    };

    let summarizer = EchoSummarizer;
    let renderer = LineRenderer::new().with_summarizer(&summarizer);
    let report = assemble(&buckets, &renderer);

    assert!(report.plans.contains("<b>Summarized</b>: Ship exporter"));
    assert!(!report.plans.contains("<b>Data</b>"));
}
