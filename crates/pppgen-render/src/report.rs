//! Report assembly.
//!
//! Turns classified buckets into the three PPP section strings: render each
//! task line (in parallel, since lines are independent), sort each section
//! ascending by its date key with undated lines last, join with `<br>`
//! bullets, and substitute the fixed placeholder sentence for an empty
//! section so downstream display never shows a bare label.

use pppgen_core::{
    Buckets, LineKind, PppReport, EMPTY_PLANS, EMPTY_PROBLEMS, EMPTY_PROGRESS,
};
use rayon::prelude::*;

use crate::{LineRenderer, RenderedLine};

/// Sort lines and join them into one section body.
///
/// The sort is stable and ascending on the date key; lines without a key go
/// after all dated lines, preserving their relative order. An empty section
/// yields `placeholder` verbatim.
pub fn assemble_section(mut lines: Vec<RenderedLine>, placeholder: &str) -> String {
    if lines.is_empty() {
        return placeholder.to_string();
    }

    // None keys order before Some in Option's Ord, so sort on presence first
    lines.sort_by_key(|line| (line.sort_key.is_none(), line.sort_key));

    let body = lines
        .iter()
        .map(|line| format!("  \u{2022} {}", line.html))
        .collect::<Vec<_>>()
        .join("<br>");

    format!("{}<br><br>", body)
}

/// Render and assemble the full report from classified buckets.
///
/// Rendering runs in parallel (each line is independent, and the
/// summarization call dominates when configured); section order comes from
/// the sort keys afterwards, so render scheduling never leaks into output
/// order. Problems is the concatenation of Blocked then Overdue lines before
/// the joint sort.
pub fn assemble(buckets: &Buckets, renderer: &LineRenderer) -> PppReport {
    let render_all = |tasks: &[pppgen_core::TaskRecord], kind: LineKind| -> Vec<RenderedLine> {
        tasks.par_iter().map(|t| renderer.render(t, kind)).collect()
    };

    let progress = render_all(&buckets.progress, LineKind::Progress);
    let plans = render_all(&buckets.plan, LineKind::Plan);

    let mut problems = render_all(&buckets.blocked, LineKind::Blocked);
    problems.extend(render_all(&buckets.overdue, LineKind::Overdue));

    PppReport {
        progress: assemble_section(progress, EMPTY_PROGRESS),
        plans: assemble_section(plans, EMPTY_PLANS),
        problems: assemble_section(problems, EMPTY_PROBLEMS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn line(html: &str, key: Option<NaiveDate>) -> RenderedLine {
        RenderedLine {
            html: html.to_string(),
            sort_key: key,
        }
    }

    #[test]
    fn empty_section_is_the_placeholder_sentence() {
        assert_eq!(assemble_section(Vec::new(), EMPTY_PROGRESS), EMPTY_PROGRESS);
    }

    #[test]
    fn lines_sort_ascending_by_date() {
        let section = assemble_section(
            vec![
                line("b", Some(date(2026, 3, 20))),
                line("a", Some(date(2026, 3, 10))),
            ],
            EMPTY_PLANS,
        );
        assert_eq!(section, "  \u{2022} a<br>  \u{2022} b<br><br>");
    }

    #[test]
    fn undated_lines_sort_last_in_input_order() {
        let section = assemble_section(
            vec![
                line("no-date-1", None),
                line("dated", Some(date(2026, 3, 10))),
                line("no-date-2", None),
            ],
            EMPTY_PLANS,
        );
        assert_eq!(
            section,
            "  \u{2022} dated<br>  \u{2022} no-date-1<br>  \u{2022} no-date-2<br><br>"
        );
    }

    #[test]
    fn equal_dates_preserve_input_order() {
        let key = Some(date(2026, 3, 10));
        let section = assemble_section(
            vec![line("first", key), line("second", key)],
            EMPTY_PLANS,
        );
        assert_eq!(section, "  \u{2022} first<br>  \u{2022} second<br><br>");
    }
}
