//! Report-generation pipeline: adapt -> classify -> render -> assemble.
//!
//! One call, one sequential pass, no state outliving it. Any failure
//! surfaces as a single `ReportError`, so the caller gets either a complete
//! well-formed report or exactly one error message, never a partial one.

use chrono::NaiveDate;
use pppgen_classify::{Classifier, ClassifyPolicy};
use pppgen_core::{PppReport, Summarizer};
use pppgen_render::{assemble, LineRenderer};
use pppgen_table::{adapt, SchemaError, Table, TableError};
use thiserror::Error;
use tracing::info;

/// Fatal report-generation failure
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Generate a PPP report for `today` from an ingested table.
///
/// `summarizer` is the optional summarization collaborator; per-task
/// failures inside it degrade individual lines and never reach this
/// result.
pub fn generate(
    table: &Table,
    policy: ClassifyPolicy,
    today: NaiveDate,
    summarizer: Option<&dyn Summarizer>,
) -> Result<PppReport, ReportError> {
    let tasks = adapt(table)?;
    info!(tasks = tasks.len(), %today, "generating report");

    let buckets = Classifier::new(policy).classify(&tasks, today);

    let mut renderer = LineRenderer::new();
    if let Some(summarizer) = summarizer {
        renderer = renderer.with_summarizer(summarizer);
    }

    Ok(assemble(&buckets, &renderer))
}
