//! Report rendering and the append-only report file.

pub mod render;
pub mod writer;

pub use render::{render_report, ReportBlock};
pub use writer::append_block;
