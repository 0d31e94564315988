//! Runtime orchestration layer for the device log analyzer.
//!
//! Runs discovery, aggregation and reporting for every log file in a
//! directory, one file at a time.

pub mod orchestrator;

pub use devlog_core as core;
pub use devlog_data as data;
pub use devlog_report as report;
