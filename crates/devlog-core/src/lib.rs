//! Shared building blocks for the device log analyzer.
//!
//! Holds the error type, the per-device statistics model, report column
//! formatting and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DevlogError, Result};
pub use models::{DeviceStats, DeviceStatsTable};
