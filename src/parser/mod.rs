//! Snapshot parsing and schema definitions.
//!
//! This module handles:
//! - Decoding raw state documents
//! - Deriving capture timestamps from filenames
//! - Extracting the recorded actor identity

pub mod schema;
pub mod tfstate;

// Re-export main types
pub use schema::{ResourceRecord, StateDocument};
pub use tfstate::{derive_captured_at, extract_recorded_identity, parse_snapshot, Snapshot};
