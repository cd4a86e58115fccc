//! Command implementations for the CLI.

pub mod analyze;
pub mod fetch;

// Re-export command entry points
pub use analyze::{execute_analyze, validate_analyze_args, AnalyzeArgs};
pub use fetch::{execute_fetch, validate_fetch_args, FetchArgs};
