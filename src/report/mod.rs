//! Report rendering and output.
//!
//! This module handles:
//! - Text rendering of lineage chronologies
//! - The fan-out sink feeding terminal and report file
//! - JSON report schema and writer
//!
//! Rendering itself is a pure projection; the sink decides where the
//! text goes.

pub mod json;
pub mod schema;
pub mod sink;
pub mod text;

// Re-export main types and functions
pub use json::{read_report, write_report};
pub use schema::{AnalysisReport, LineageReport, ParseFailure, ResourceTypeChange, SnapshotEntry};
pub use sink::ReportSink;
pub use text::{format_duration, render_header, render_lineage};
