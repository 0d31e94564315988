//! Fixed-width column formatting for analysis reports.
//!
//! All widths are minimums: values longer than their column are written in
//! full and push the following columns to the right.

use chrono::NaiveDateTime;

/// Width of the `=` rules framing a report header.
pub const HEADER_RULE_WIDTH: usize = 70;
/// Width of the `-` rules framing the device table.
pub const TABLE_RULE_WIDTH: usize = 75;

pub const DEVICE_COLUMN_WIDTH: usize = 25;
pub const COUNT_COLUMN_WIDTH: usize = 10;
pub const TIMESTAMP_COLUMN_WIDTH: usize = 20;

/// Label used on the totals row.
pub const TOTAL_LABEL: &str = "TOTAL ENTRIES";

/// Layout of the analysis date line.
pub const ANALYSIS_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Repeat `ch` `width` times.
///
/// # Examples
///
/// ```
/// use devlog_core::formatting::rule;
///
/// assert_eq!(rule('=', 3), "===");
/// assert_eq!(rule('-', 0), "");
/// ```
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// One row of the device table, each column left-justified and separated by
/// a single space.
pub fn format_table_row(device: &str, count: &str, first: &str, last: &str) -> String {
    format!(
        "{:<dw$} {:<cw$} {:<tw$} {:<tw$}",
        device,
        count,
        first,
        last,
        dw = DEVICE_COLUMN_WIDTH,
        cw = COUNT_COLUMN_WIDTH,
        tw = TIMESTAMP_COLUMN_WIDTH,
    )
}

/// The column header row of the device table.
pub fn format_column_header() -> String {
    format_table_row("Device Name", "Count", "First Entry", "Last Entry")
}

/// The `TOTAL ENTRIES` row closing the device table.
///
/// # Examples
///
/// ```
/// use devlog_core::formatting::format_totals_row;
///
/// assert_eq!(
///     format_totals_row(3),
///     format!("{:<25} {:<10}", "TOTAL ENTRIES", 3)
/// );
/// ```
pub fn format_totals_row(total: u64) -> String {
    format!(
        "{:<dw$} {:<cw$}",
        TOTAL_LABEL,
        total,
        dw = DEVICE_COLUMN_WIDTH,
        cw = COUNT_COLUMN_WIDTH,
    )
}

/// Format the moment a report was generated as `YYYY-MM-DD HH:MM:SS`.
pub fn format_analysis_date(generated_at: &NaiveDateTime) -> String {
    generated_at.format(ANALYSIS_DATE_FORMAT).to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
