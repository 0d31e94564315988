use clap::Parser;
use std::path::{Path, PathBuf};

/// Default folder scanned for `.log` files.
pub const DEFAULT_LOGS_DIR: &str = "hospital_data/active_logs";

/// Folder, next to the logs folder, holding the cumulative report.
pub const REPORTS_DIR_NAME: &str = "reports";

/// File name of the cumulative report.
pub const REPORT_FILE_NAME: &str = "analysis_report.txt";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Count device occurrences in log files and append a summary per file to
/// the analysis report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "device-log-analyzer",
    about = "Count device occurrences in log files and append a summary per file to the analysis report",
    version
)]
pub struct Settings {
    /// Directory scanned for .log files
    #[arg(value_name = "LOGS_DIR", default_value = DEFAULT_LOGS_DIR)]
    pub logs_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parse an explicit argument list, enabling unit tests without spawning
    /// subprocesses.
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Location of the cumulative report for this run.
    pub fn report_path(&self) -> PathBuf {
        report_path_for(&self.logs_dir)
    }
}

/// The report lives in the `reports/` sibling of the logs directory:
/// `<logs_dir>/../reports/analysis_report.txt`.
pub fn report_path_for(logs_dir: &Path) -> PathBuf {
    let base = match logs_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    base.join(REPORTS_DIR_NAME).join(REPORT_FILE_NAME)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
