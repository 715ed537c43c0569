//! Formatted output helpers for CLI commands.

use procmon_common::types::Record;
use procmon_tui::ui::decoration;

/// Column header line for [`format_row`].
#[must_use]
pub fn header() -> String {
    format!("  {:<6} {:<10} {:<8} {:<18} {}", "ID", "TIME", "PROCESS", "TYPE", "SUMMARY")
}

/// Formats one record as a table line. Severe rows are marked with `!`.
#[must_use]
pub fn format_row(position: usize, record: &Record) -> String {
    let marker = if record.severe { '!' } else { ' ' };
    format!(
        "{marker} {:<6} {:<10} {:<8} {:<18} {}",
        position,
        record.timestamp,
        record.owner_id,
        decoration::resolve(&record.type_tag).label,
        record.summary
    )
}
