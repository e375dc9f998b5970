//! User-facing messages
//!
//! Every terminal outcome becomes exactly one human-readable string. Nothing
//! outside this module needs to know the wording.

use crate::pipeline::{Outcome, ViewOutcome};
use crate::storage::FetchRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Format used for stored timestamps
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Renders the result of a `get` request
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tagcounter::output::render_get;
/// use tagcounter::Outcome;
///
/// let outcome = Outcome::Fresh {
///     site: "example.com".to_string(),
///     elapsed: Duration::from_millis(1234),
///     tag_data: "p - 2\n".to_string(),
/// };
/// assert_eq!(render_get(&outcome), "GET: Page loaded in 1.23s\n\np - 2\n");
/// ```
pub fn render_get(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Hit {
            stored_at,
            tag_data,
            ..
        } => format!(
            "GET: Page has been loaded before:\n{}\n\n{}",
            format_date(stored_at),
            tag_data
        ),
        Outcome::Fresh {
            elapsed, tag_data, ..
        } => format!(
            "GET: Page loaded in {:.2}s\n\n{}",
            elapsed.as_secs_f64(),
            tag_data
        ),
        Outcome::Failed { error, .. } => error.to_string(),
    }
}

/// Renders the result of a `view` request
pub fn render_view(outcome: &ViewOutcome) -> String {
    match outcome {
        ViewOutcome::Hit {
            stored_at,
            tag_data,
            ..
        } => format!(
            "VIEW: Page has been loaded before:\n{}\n\n{}",
            format_date(stored_at),
            tag_data
        ),
        ViewOutcome::NotFound { site } => format!(
            "VIEW: Page {} was not found in the database, please use get to load this page first",
            site
        ),
    }
}

/// Renders the alias table as `<alias> - <site>` lines
pub fn render_aliases(aliases: &BTreeMap<String, String>) -> String {
    if aliases.is_empty() {
        return "No aliases defined".to_string();
    }

    let mut out = String::new();
    for (alias, site) in aliases {
        out.push_str(&format!("{} - {}\n", alias, site));
    }
    out
}

/// Renders every stored record for a site, newest first
pub fn render_history(site: &str, records: &[FetchRecord]) -> String {
    if records.is_empty() {
        return format!("HISTORY: Page {} was never loaded", site);
    }

    let mut out = format!("HISTORY: {} record(s) for {}\n", records.len(), site);
    for record in records {
        out.push_str(&format!(
            "\n#{} {}\n{}",
            record.id,
            format_date(&record.created_at),
            record.tag_data
        ));
    }
    out
}
