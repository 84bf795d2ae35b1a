//! Date normalization.
//!
//! Source cells carry dates in several shapes: a single token, or a
//! comma-separated "timeline" cell listing a date range or milestones. The
//! canonical value of a timeline cell is the latest parseable date, the
//! "done by" date. Unparseable input normalizes to absent, never to an
//! error: a report over a partly dirty export should still come out.

use chrono::NaiveDate;
use tracing::debug;

/// Accepted date token formats, tried in order. `%y` comes before `%Y`:
/// it requires exactly two digits, while `%Y` also accepts short years and
/// would turn `1/9/24` into year 0024.
const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%d-%b-%Y"];

/// Parse a single date token. `None` if no format matches.
pub fn parse_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Normalize a source cell to a canonical day-precision date.
///
/// Splits on commas, parses each token, and takes the latest parsed date.
/// Blank cells and cells where no token parses normalize to `None`.
pub fn normalize_date(cell: &str) -> Option<NaiveDate> {
    if cell.trim().is_empty() {
        return None;
    }

    let latest = cell.split(',').filter_map(parse_token).max();
    if latest.is_none() {
        debug!(cell, "unparseable date cell treated as absent");
    }
    latest
}
