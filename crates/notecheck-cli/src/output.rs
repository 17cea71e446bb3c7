//! Output formatting utilities.

use chrono::DateTime;
use notecheck_canonical::Event;
use notecheck_core::{Acceptance, Rejection};

/// One line of `verify` output.
pub struct Row {
    pub file: String,
    pub event_id: Option<String>,
    pub kind: Option<u64>,
    pub created_at: Option<u64>,
    pub author: Option<String>,
    pub verdict: &'static str,
    pub reason: Option<String>,
}

impl Row {
    /// Row for a file that could not be read or parsed.
    pub fn unreadable(file: &str, reason: String) -> Self {
        Self {
            file: file.to_string(),
            event_id: None,
            kind: None,
            created_at: None,
            author: None,
            verdict: "unreadable",
            reason: Some(reason),
        }
    }

    /// Row for a validated event.
    pub fn from_result(file: &str, event: &Event, result: &Result<Acceptance, Rejection>) -> Self {
        let (verdict, author, reason) = match result {
            Ok(a) => ("ok", Some(a.effective_author().to_string()), None),
            Err(r) => (r.code(), None, Some(r.to_string())),
        };
        Self {
            file: file.to_string(),
            event_id: Some(event.id.clone()),
            kind: Some(event.kind),
            created_at: Some(event.created_at),
            author,
            verdict,
            reason,
        }
    }
}

/// Renders a Unix timestamp as RFC 3339, or the raw number if out of range.
pub fn format_timestamp(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Formats a verify row as a table line.
pub fn format_table_row(row: &Row) -> String {
    let event_id = row.event_id.as_deref().unwrap_or("?");
    let kind = row.kind.map(|k| k.to_string()).unwrap_or_else(|| "?".into());
    let created = row
        .created_at
        .map(format_timestamp)
        .unwrap_or_else(|| "?".into());
    let detail = match (&row.author, &row.reason) {
        (_, Some(reason)) => reason.as_str(),
        (Some(author), None) => author.as_str(),
        (None, None) => "",
    };

    format!(
        "{:<20} {:<6} {:<20} {:<30} {}",
        truncate(event_id, 20),
        kind,
        truncate(&created, 20),
        row.verdict,
        detail
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<20} {:<6} {:<20} {:<30} {}",
        "EVENT_ID", "KIND", "CREATED_AT", "VERDICT", "AUTHOR/REASON"
    );
    println!("{}", "-".repeat(100));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
