//! Data ingestion layer for the device log analyzer.
//!
//! Discovers `.log` files in a directory and aggregates their lines into
//! per-device statistics.

pub mod aggregator;
pub mod reader;

pub use devlog_core as core;
