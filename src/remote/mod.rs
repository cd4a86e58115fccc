//! Remote snapshot archive access.
//!
//! This module handles:
//! - Listing object keys stored in the archive
//! - Listing the stored versions of one object
//! - Downloading individual versions

pub mod client;
pub mod types;

// Re-export main types
pub use client::ArchiveClient;
pub use types::{KeyListing, ObjectVersion, VersionListing};
