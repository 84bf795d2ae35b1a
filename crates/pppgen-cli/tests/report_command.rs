//! E2E tests for the report and check commands.
//!
//! These run the built binary against temp CSV fixtures with a pinned
//! reporting date, so output is deterministic.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tempfile::NamedTempFile;

const BOARD_CSV: &str = "\
24Q3 Review Portfolio,,,,
A high level overview of all your projects.,,,,
,,,,
Committed,,,,
Name,Status,Timeline,Project DRI,Comments
Subitems,,,,
Migrate CRM,Completed,2/26/2026,Alice,
Ship exporter,Working,3/20/2026,Bob,
Fix billing,Blocked,2/1/2026,Carol,vendor outage
Late task,Committed,2/15/2026,Dan,
";

fn pppgen_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("target/debug/pppgen")
}

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("failed to create fixture");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Run pppgen and return (exit_code, stdout, stderr)
fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(pppgen_binary())
        .args(args)
        .output()
        .expect("failed to execute pppgen");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

// =============================================================================
// report
// =============================================================================

#[test]
fn report_buckets_a_board_export() {
    let fixture = write_fixture(BOARD_CSV);
    let (code, stdout, _) = run(&[
        "report",
        fixture.path().to_str().unwrap(),
        "--skip-rows",
        "4",
        "--date",
        "2026-03-01",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Progress [Last Week]"));
    assert!(stdout.contains("Migrate CRM"));
    assert!(stdout.contains("Ship exporter"));
    assert!(stdout.contains("(vendor outage)"));
    assert!(stdout.contains("(overdue)"));
    // sentinel sub-header never becomes a task line
    assert!(!stdout.contains("Subitems"));
}

#[test]
fn report_empty_sections_print_placeholders() {
    let fixture = write_fixture("Name,Status,Timeline\n");
    let (code, stdout, _) = run(&[
        "report",
        fixture.path().to_str().unwrap(),
        "--date",
        "2026-03-01",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("No tasks completed within the last week."));
    assert!(stdout.contains("Nothing planned for the next two months."));
    assert!(stdout.contains("No blocked or overdue projects."));
}

#[test]
fn report_json_output_round_trips() {
    let fixture = write_fixture(BOARD_CSV);
    let (code, stdout, _) = run(&[
        "report",
        fixture.path().to_str().unwrap(),
        "--skip-rows",
        "4",
        "--date",
        "2026-03-01",
        "--format",
        "json",
    ]);

    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(value["plans"].as_str().unwrap().contains("Ship exporter"));
    assert!(value["problems"].as_str().unwrap().contains("Fix billing"));
}

#[test]
fn report_missing_status_column_fails_naming_it() {
    let fixture = write_fixture("Name,Timeline\nX,3/1/2026\n");
    let (code, stdout, stderr) = run(&[
        "report",
        fixture.path().to_str().unwrap(),
        "--date",
        "2026-03-01",
    ]);

    assert_ne!(code, 0);
    assert!(stderr.contains("Status"));
    // no partial report on stdout
    assert!(!stdout.contains("Progress"));
}

#[test]
fn report_blocked_as_overdue_double_reports() {
    let csv = "\
Name,Status,Timeline
Stuck,Blocked,2/1/2026
";
    let fixture = write_fixture(csv);

    let (_, default_out, _) = run(&[
        "report",
        fixture.path().to_str().unwrap(),
        "--date",
        "2026-03-01",
    ]);
    assert_eq!(default_out.matches("Stuck").count(), 1);

    let (_, legacy_out, _) = run(&[
        "report",
        fixture.path().to_str().unwrap(),
        "--date",
        "2026-03-01",
        "--blocked-as-overdue",
    ]);
    assert_eq!(legacy_out.matches("Stuck").count(), 2);
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_reports_resolved_columns_and_row_count() {
    let fixture = write_fixture(BOARD_CSV);
    let (code, stdout, _) = run(&[
        "check",
        fixture.path().to_str().unwrap(),
        "--skip-rows",
        "4",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Timeline"));
    assert!(stdout.contains("Task rows: 4"));
}

#[test]
fn check_fails_on_missing_required_columns() {
    let fixture = write_fixture("Owner,Notes\nX,Y\n");
    let (code, _, stderr) = run(&["check", fixture.path().to_str().unwrap()]);

    assert_ne!(code, 0);
    assert!(stderr.contains("missing required columns"));
    assert!(stderr.contains("Status"));
}
