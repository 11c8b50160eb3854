//! Pure Markdown rendering helpers for the entry list.
//!
//! Entry block:
//!   ## Morning
//!
//!   *Mon, 01 Jan 2024 08:00* · **Calmness** · (-122.2585, 37.8719)
//!
//!   Description, or one `**label:** answer` line per template field.

use crate::entry::{EntryKind, JournalEntry};
use chrono::{DateTime, Utc};

/// Formats an entry date according to the user's configuration.
pub fn format_date(date: DateTime<Utc>, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// One line: `date · mood · title`.
pub fn format_entry_line(entry: &JournalEntry, date_format: &str) -> String {
    format!(
        "{} · {} · {}",
        format_date(entry.date, date_format),
        entry.mood,
        entry.title
    )
}

/// Render an entry block.
pub fn format_entry_block(entry: &JournalEntry, date_format: &str) -> String {
    let mut block = format!(
        "## {}\n\n*{}* · **{}** · {}\n\n",
        entry.title,
        format_date(entry.date, date_format),
        entry.mood,
        entry.location
    );
    let description = entry.description.trim_end_matches('\n');
    if !description.trim().is_empty() {
        block.push_str(description);
        block.push_str("\n\n");
    }
    if let EntryKind::Templated(answers) = &entry.kind {
        for (label, answer) in answers.iter() {
            block.push_str(&format!("**{label}:** {answer}\n"));
        }
        block.push('\n');
    }
    block
}
