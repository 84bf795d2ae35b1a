//! # pppgen-render
//!
//! Rendering backends for pppgen reports.
//!
//! This crate provides:
//! - Per-task HTML-fragment line rendering with optional AI summarization
//! - Report assembly: section sorting, joining, empty-section placeholders
//! - An HTTP summarization client (`HttpSummarizer`)
//!
//! Output is HTML-fragment text with a small fixed tag vocabulary (`<b>`,
//! `<br>`, styled `<span>`s) meant to be dropped into a host page, not a
//! full document.
//!
//! ## Example Output
//!
//! ```text
//! <span class='date'>3/15</span> <b>Sales Platform</b>: Migrate CRM data <span class='assignee'>[Field Ops]</span>
//! ```

pub mod report;
pub mod summary;

pub use report::{assemble, assemble_section};
pub use summary::HttpSummarizer;

use chrono::NaiveDate;
use pppgen_core::{LineKind, Summarizer, TaskRecord};
use tracing::warn;

/// A rendered task line plus the metadata the assembler sorts on.
///
/// The assembler's sort is stable, so lines with equal (or absent) keys
/// keep the order they were rendered in: source row order within a bucket,
/// Blocked before Overdue in the Problems section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    /// HTML-fragment text for the line
    pub html: String,
    /// Section ordering key; `None` sorts after all dated lines
    pub sort_key: Option<NaiveDate>,
}

/// Renders one task into one display line.
///
/// Holds the optional summarization capability by reference: the renderer
/// itself is cheap and call-scoped, the collaborator is injected by the
/// caller (never ambient global state).
#[derive(Clone, Copy, Default)]
pub struct LineRenderer<'a> {
    summarizer: Option<&'a dyn Summarizer>,
}

impl<'a> LineRenderer<'a> {
    pub fn new() -> Self {
        Self { summarizer: None }
    }

    /// Inject a summarization collaborator
    pub fn with_summarizer(mut self, summarizer: &'a dyn Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Render a task line for the given report bucket.
    ///
    /// Layout: date, optional original-date annotation, the goal/name/owner
    /// triad (summarized when a collaborator is available), then blocked and
    /// overdue annotations. Absent optional fields are omitted together with
    /// their decoration.
    pub fn render(&self, task: &TaskRecord, kind: LineKind) -> RenderedLine {
        let sort_key = match kind {
            LineKind::Progress => task.complete_date,
            LineKind::Plan | LineKind::Blocked | LineKind::Overdue => task.target_date,
        };

        let mut html = String::new();

        if let Some(date) = sort_key {
            html.push_str(&format!(
                "<span class='date'>{}</span> ",
                date.format("%-m/%-d")
            ));
        }
        if let Some(og) = task.original_target_date {
            html.push_str(&format!(
                "<span class='og-date'>({})</span> ",
                og.format("%-m/%-d")
            ));
        }

        html.push_str(&self.triad(task));

        if kind == LineKind::Blocked {
            let reason = task.comment.as_deref().unwrap_or("blocked");
            html.push_str(&format!(
                " <span class='red-text'>({})</span>",
                escape(reason)
            ));
        }
        if kind == LineKind::Overdue {
            html.push_str(" <span class='red-text'>(overdue)</span>");
        }

        RenderedLine { html, sort_key }
    }

    /// The goal / name / owner triad: collaborator output when one is
    /// configured and answers, raw fields otherwise. Collaborator failure
    /// is local to the line.
    fn triad(&self, task: &TaskRecord) -> String {
        if let Some(summarizer) = self.summarizer {
            match summarizer.summarize(&task.raw_fields) {
                Ok(summary) if !summary.trim().is_empty() => return summary.trim().to_string(),
                Ok(_) => warn!(task = %task.name, "summarizer returned blank text, using raw fields"),
                Err(err) => warn!(task = %task.name, %err, "summarization failed, using raw fields"),
            }
        }
        fallback_triad(task)
    }
}

/// Raw goal/name/owner line, used when no summarizer is configured or the
/// call fails
fn fallback_triad(task: &TaskRecord) -> String {
    let mut out = String::new();
    if let Some(initiative) = &task.initiative {
        out.push_str(&format!("<b>{}</b>: ", escape(initiative)));
    }
    out.push_str(&escape(&task.name));
    if let Some(owner) = &task.owner {
        out.push_str(&format!(" <span class='assignee'>[{}]</span>", escape(owner)));
    }
    out
}

/// Escape source text for the HTML fragment (source cells are plain text)
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
