//! Batch orchestration over a directory of log files.
//!
//! Each source is aggregated and appended to the report before the next one
//! starts. Per-source failures are recorded in the [`RunSummary`] and, under
//! the default [`FailurePolicy::Continue`], do not stop the batch.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use devlog_core::{DevlogError, Result};
use devlog_data::aggregator::DeviceAggregator;
use devlog_data::reader::find_log_files;
use devlog_report::{append_block, render_report};
use tracing::{info, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// What to do when one source fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next source.
    #[default]
    Continue,
    /// Stop the batch at the first failed source.
    Abort,
}

/// Result of processing one log source.
#[derive(Debug)]
pub enum SourceOutcome {
    /// The source was analysed and its block appended to the report.
    Reported {
        source: PathBuf,
        /// Number of distinct devices seen.
        devices: usize,
        /// Sum of entry counts across all devices.
        total_entries: u64,
        bytes_appended: u64,
    },
    /// Reading the source or appending its block failed.
    Failed { source: PathBuf, error: DevlogError },
}

impl SourceOutcome {
    pub fn source(&self) -> &Path {
        match self {
            SourceOutcome::Reported { source, .. } | SourceOutcome::Failed { source, .. } => {
                source
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SourceOutcome::Failed { .. })
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// Sources found in the logs directory, in processing order.
    Discovered(&'a [PathBuf]),
    /// One source has been fully handled.
    Processed(&'a SourceOutcome),
}

/// Everything a batch run did, in processing order.
#[derive(Debug)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub outcomes: Vec<SourceOutcome>,
    /// `true` when [`FailurePolicy::Abort`] stopped the run early.
    pub aborted: bool,
}

impl RunSummary {
    pub fn reported_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failure()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

// ── AnalysisOrchestrator ──────────────────────────────────────────────────────

/// Drives discovery, aggregation and reporting for one logs directory.
pub struct AnalysisOrchestrator {
    logs_dir: PathBuf,
    report_path: PathBuf,
    policy: FailurePolicy,
    clock: fn() -> NaiveDateTime,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator reading from `logs_dir` and appending to
    /// `report_path`.
    pub fn new(logs_dir: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            report_path: report_path.into(),
            policy: FailurePolicy::default(),
            clock: local_now,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the source of the "Analysis Date" stamped on each block.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// List the log files to process, sorted by name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        find_log_files(&self.logs_dir)
    }

    /// Discover and process every log file.
    ///
    /// `on_event` sees the discovered list first, then each outcome as soon
    /// as its source is done. Only a missing logs directory fails the whole
    /// run; an empty directory yields a summary without outcomes.
    pub fn run<F>(&self, mut on_event: F) -> Result<RunSummary>
    where
        F: FnMut(RunEvent<'_>),
    {
        let sources = self.discover()?;
        if sources.is_empty() {
            info!("No log files found in {}", self.logs_dir.display());
        }
        on_event(RunEvent::Discovered(&sources));
        Ok(self.process_sources(&sources, on_event))
    }

    /// Process `sources` in the given order, reporting each outcome to
    /// `on_event` before moving on.
    pub fn process_sources<F>(&self, sources: &[PathBuf], mut on_event: F) -> RunSummary
    where
        F: FnMut(RunEvent<'_>),
    {
        let mut summary = RunSummary {
            report_path: self.report_path.clone(),
            outcomes: Vec::with_capacity(sources.len()),
            aborted: false,
        };

        for source in sources {
            let outcome = self.process_source(source);
            let failed = outcome.is_failure();
            on_event(RunEvent::Processed(&outcome));
            summary.outcomes.push(outcome);

            if failed && self.policy == FailurePolicy::Abort {
                warn!("Aborting run after failure in {}", source.display());
                summary.aborted = true;
                break;
            }
        }

        info!(
            "Run finished: {} reported, {} failed",
            summary.reported_count(),
            summary.failed_count()
        );
        summary
    }

    /// Aggregate one source and append its block to the report.
    pub fn process_source(&self, source: &Path) -> SourceOutcome {
        match self.analyze_and_append(source) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("{}", error);
                SourceOutcome::Failed {
                    source: source.to_path_buf(),
                    error,
                }
            }
        }
    }

    // ── Private implementation ────────────────────────────────────────────

    fn analyze_and_append(&self, source: &Path) -> Result<SourceOutcome> {
        let table = DeviceAggregator::analyze_file(source)?;

        let block = render_report(&table, &source_name(source), &(self.clock)());
        let bytes_appended = append_block(&self.report_path, &block)?;

        info!(
            "Analyzed {}: {} devices, {} entries",
            source.display(),
            table.len(),
            table.total_entries()
        );

        Ok(SourceOutcome::Reported {
            source: source.to_path_buf(),
            devices: table.len(),
            total_entries: table.total_entries(),
            bytes_appended,
        })
    }
}

/// File name used in the report header.
pub fn source_name(source: &Path) -> String {
    source
        .file_name()
        .unwrap_or(source.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
