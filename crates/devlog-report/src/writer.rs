//! Append-only access to the cumulative report file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use devlog_core::{DevlogError, Result};
use tracing::debug;

use crate::render::ReportBlock;

/// Append `block` to the report at `report_path`.
///
/// The file is created if absent, but its directory must already exist.
/// Existing content is never touched; the handle is closed before returning
/// on every path. Returns the number of bytes appended.
pub fn append_block(report_path: &Path, block: &ReportBlock) -> Result<u64> {
    let destination_error = |source| DevlogError::DestinationUnavailable {
        path: report_path.to_path_buf(),
        source,
    };

    let text = block.to_text();
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(report_path)
        .map_err(destination_error)?;
    file.write_all(text.as_bytes()).map_err(destination_error)?;

    debug!("Appended {} bytes to {}", text.len(), report_path.display());
    Ok(text.len() as u64)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
