//! Per-device aggregation of log lines.
//!
//! Every line is split on runs of whitespace. Lines with at least
//! three tokens are read as `<date> <time> <device> [ignored...]`; anything
//! shorter, including blank lines, is skipped without error.

use std::path::Path;

use devlog_core::{DeviceStatsTable, Result};
use tracing::debug;

use crate::reader::open_log;

// ── LogRecord ─────────────────────────────────────────────────────────────────

/// The fields extracted from one well-formed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    /// `"<date> <time>"`, kept as an opaque string.
    pub timestamp: String,
    /// Third token of the line.
    pub device: &'a str,
}

/// Token separator: Unicode whitespace plus the ASCII information
/// separators `\x1c`..=`\x1f`.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Parse a single line, returning `None` for blank or short lines.
pub fn parse_line(line: &str) -> Option<LogRecord<'_>> {
    let mut tokens = line.split(is_separator).filter(|t| !t.is_empty());
    let date = tokens.next()?;
    let time = tokens.next()?;
    let device = tokens.next()?;
    Some(LogRecord {
        timestamp: format!("{} {}", date, time),
        device,
    })
}

// ── DeviceAggregator ──────────────────────────────────────────────────────────

/// Builds a [`DeviceStatsTable`] from the lines of one log source.
#[derive(Debug, Default)]
pub struct DeviceAggregator {
    table: DeviceStatsTable,
    lines_read: u64,
    lines_skipped: u64,
}

impl DeviceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate an in-memory sequence of lines.
    pub fn analyze<I, S>(lines: I) -> DeviceStatsTable
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aggregator = Self::new();
        for line in lines {
            aggregator.push_line(line.as_ref());
        }
        aggregator.finish()
    }

    /// Aggregate a fallible line sequence.
    ///
    /// The first error aborts the aggregation; no partial table is returned.
    pub fn try_analyze<I>(lines: I) -> Result<DeviceStatsTable>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut aggregator = Self::new();
        for line in lines {
            aggregator.push_line(&line?);
        }
        Ok(aggregator.finish())
    }

    /// Open `path` and aggregate every line in it.
    ///
    /// Fails with [`devlog_core::DevlogError::SourceUnavailable`] when the
    /// file cannot be opened or read.
    pub fn analyze_file(path: &Path) -> Result<DeviceStatsTable> {
        let mut aggregator = Self::new();
        for line in open_log(path)? {
            aggregator.push_line(&line?);
        }

        debug!(
            "File {}: {} lines read, {} skipped, {} devices",
            path.display(),
            aggregator.lines_read,
            aggregator.lines_skipped,
            aggregator.table.len(),
        );

        Ok(aggregator.finish())
    }

    /// Feed one raw line into the aggregation.
    pub fn push_line(&mut self, line: &str) {
        self.lines_read += 1;
        match parse_line(line) {
            Some(record) => self.table.record(record.device, &record.timestamp),
            None => self.lines_skipped += 1,
        }
    }

    /// Number of lines fed so far, including skipped ones.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Number of blank or short lines ignored so far.
    pub fn lines_skipped(&self) -> u64 {
        self.lines_skipped
    }

    /// Consume the aggregator and return the completed table.
    pub fn finish(self) -> DeviceStatsTable {
        self.table
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
