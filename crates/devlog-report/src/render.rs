//! Fixed-layout rendering of one analysis block.
//!
//! A block looks like this (widths shortened):
//!
//! ```text
//!
//! ======================================
//! Log File Analysis: icu.log
//! Analysis Date: 2024-01-01 12:00:00
//! ======================================
//!
//! Device Name   Count  First Entry          Last Entry
//! ------------------------------------------------------
//! PUMP-A        2      2024-01-01 08:00:00  2024-01-01 09:00:00
//! ------------------------------------------------------
//! TOTAL ENTRIES 2
//! ```
//!
//! The leading empty line separates the block from whatever the report
//! already holds; the trailing empty line makes the block end with a newline.

use std::fmt;

use chrono::NaiveDateTime;
use devlog_core::formatting::{
    format_analysis_date, format_column_header, format_table_row, format_totals_row, rule,
    HEADER_RULE_WIDTH, TABLE_RULE_WIDTH,
};
use devlog_core::DeviceStatsTable;

// ── ReportBlock ───────────────────────────────────────────────────────────────

/// The rendered lines of one report block, ready to be newline-joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    lines: Vec<String>,
}

impl ReportBlock {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The block as written to the report file.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for ReportBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the analysis of `source_name` as a report block.
///
/// Device rows follow the table's ascending identifier order.
pub fn render_report(
    table: &DeviceStatsTable,
    source_name: &str,
    generated_at: &NaiveDateTime,
) -> ReportBlock {
    let header_rule = rule('=', HEADER_RULE_WIDTH);
    let table_rule = rule('-', TABLE_RULE_WIDTH);

    let mut lines = Vec::with_capacity(table.len() + 11);
    lines.push(String::new());
    lines.push(header_rule.clone());
    lines.push(format!("Log File Analysis: {}", source_name));
    lines.push(format!(
        "Analysis Date: {}",
        format_analysis_date(generated_at)
    ));
    lines.push(header_rule);
    lines.push(String::new());

    lines.push(format_column_header());
    lines.push(table_rule.clone());

    for (device, stats) in table.iter() {
        lines.push(format_table_row(
            device,
            &stats.count.to_string(),
            stats.first_timestamp.as_deref().unwrap_or_default(),
            stats.last_timestamp.as_deref().unwrap_or_default(),
        ));
    }

    lines.push(table_rule);
    lines.push(format_totals_row(table.total_entries()));
    lines.push(String::new());

    ReportBlock { lines }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
