//! Main parser for state snapshot blobs.
//!
//! Turns a raw blob plus its source filename into a structured Snapshot:
//! decodes the document, extracts the recorded identity, and derives the
//! capture time from the filename suffix.

use super::schema::{ResourceRecord, StateDocument};
use crate::utils::config::{FILENAME_TIMESTAMP_FORMAT, IDENTITY_LOOKUP_PATH};
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};

/// One parsed state revision (internal representation)
///
/// A Snapshot is an immutable value: two byte-identical blobs with the
/// same source name produce equal snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Stable identifier shared by all revisions of one state; may be
    /// empty, in which case the empty string forms a group of its own
    pub lineage: String,

    /// Producer-assigned revision counter; ordering key within a lineage.
    /// Not guaranteed unique or gap-free.
    pub serial: u64,

    /// Resource inventory at this revision
    pub resources: Vec<ResourceRecord>,

    /// Actor identity recorded in the snapshot data, if any
    pub recorded_identity: Option<String>,

    /// Filename the blob came from
    pub source_name: String,

    /// Capture time derived from the filename suffix
    pub captured_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Number of resources at this revision
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

/// Parse a raw snapshot blob into a Snapshot
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `blob` - Raw state file contents
/// * `source_name` - Filename the blob came from
///
/// # Returns
/// Parsed snapshot ready for grouping
///
/// # Errors
/// * `ParseError::JsonError` - Blob is not a valid JSON document
///
/// A missing `lineage` or `serial` is not an error; they default to the
/// empty string and zero. A filename without a parseable timestamp
/// suffix leaves `captured_at` absent, which the renderer reports as a
/// per-snapshot note.
pub fn parse_snapshot(blob: &[u8], source_name: &str) -> Result<Snapshot, ParseError> {
    debug!("Parsing snapshot from: {}", source_name);

    let document: StateDocument = serde_json::from_slice(blob)?;

    let recorded_identity = document
        .values
        .as_ref()
        .and_then(extract_recorded_identity);

    let captured_at = derive_captured_at(source_name);
    if captured_at.is_none() {
        warn!("No capture timestamp in filename: {}", source_name);
    }

    debug!(
        "Parsed snapshot: lineage={}, serial={}, {} resources",
        document.lineage,
        document.serial,
        document.resources.len()
    );

    Ok(Snapshot {
        lineage: document.lineage,
        serial: document.serial,
        resources: document.resources,
        recorded_identity,
        source_name: source_name.to_string(),
        captured_at,
    })
}

/// Extract the recorded actor identity from the values document
///
/// **Public** - exposed for tests
///
/// Walks the fixed identity path, returning `None` as soon as any level
/// is absent or the wrong shape. Never an error: older snapshots simply
/// have no recorded identity.
pub fn extract_recorded_identity(values: &serde_json::Value) -> Option<String> {
    IDENTITY_LOOKUP_PATH
        .iter()
        .try_fold(values, |node, segment| node.get(segment))?
        .as_str()
        .map(str::to_owned)
}

/// Derive the capture time from a snapshot filename
///
/// **Public** - exposed for tests
///
/// The archive names downloads `<version>-<YYYYMMDDThhmmssZ>.<ext>`;
/// the portion of the stem after the last hyphen is the timestamp.
/// Filenames without a hyphen are tried whole; a non-conforming suffix
/// yields `None`.
pub fn derive_captured_at(source_name: &str) -> Option<DateTime<Utc>> {
    let stem = match source_name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => source_name,
    };
    let suffix = match stem.rsplit_once('-') {
        Some((_, suffix)) => suffix,
        None => stem,
    };

    NaiveDateTime::parse_from_str(suffix, FILENAME_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
