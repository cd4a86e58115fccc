//! Schema definitions for the JSON analysis report.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::history::Delta;
use crate::parser::Snapshot;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level analysis report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Directory the snapshots were read from
    pub states_dir: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Snapshot blobs that failed to decode
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parse_failures: Vec<ParseFailure>,

    /// Per-lineage chronology, ordered by lineage id
    pub lineages: Vec<LineageReport>,
}

impl AnalysisReport {
    /// Create an empty report stamped with the current time
    pub fn new(states_dir: impl Into<String>) -> Self {
        AnalysisReport {
            version: SCHEMA_VERSION.to_string(),
            states_dir: states_dir.into(),
            generated_at: Utc::now().to_rfc3339(),
            parse_failures: Vec::new(),
            lineages: Vec::new(),
        }
    }
}

/// A blob that could not be decoded as a state document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Filename the blob came from
    pub source_name: String,

    /// Decode error, as rendered text
    pub error: String,
}

/// Chronology of one lineage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageReport {
    /// Lineage id (may be empty)
    pub lineage: String,

    /// Number of snapshots found for this lineage
    pub snapshot_count: usize,

    /// Snapshots in serial order, each with its delta
    pub entries: Vec<SnapshotEntry>,
}

impl LineageReport {
    /// Build a lineage report from ordered snapshots and their deltas
    pub fn from_parts(lineage: &str, ordered: &[Snapshot], deltas: &[Delta]) -> Self {
        LineageReport {
            lineage: lineage.to_string(),
            snapshot_count: ordered.len(),
            entries: ordered
                .iter()
                .zip(deltas)
                .map(|(snapshot, delta)| SnapshotEntry::from_parts(snapshot, delta))
                .collect(),
        }
    }
}

/// One snapshot revision with its delta against the previous revision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Filename the snapshot came from
    pub source_name: String,

    /// Producer-assigned revision counter
    pub serial: u64,

    /// Capture time derived from the filename (RFC 3339), if it parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,

    /// Seconds since the last snapshot with a parsed timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<i64>,

    /// Actor identity recorded in the snapshot, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_identity: Option<String>,

    /// Resource count at this revision
    pub resource_count: usize,

    /// Change against the previous revision (zero for the first)
    pub resource_count_change: i64,

    /// Per-type count changes, keyed by resource type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_changes: BTreeMap<String, ResourceTypeChange>,
}

impl SnapshotEntry {
    /// Build an entry from a snapshot and its computed delta
    pub fn from_parts(snapshot: &Snapshot, delta: &Delta) -> Self {
        SnapshotEntry {
            source_name: snapshot.source_name.clone(),
            serial: snapshot.serial,
            captured_at: snapshot.captured_at.map(|ts| ts.to_rfc3339()),
            elapsed_seconds: delta.elapsed.map(|elapsed| elapsed.num_seconds()),
            recorded_identity: snapshot.recorded_identity.clone(),
            resource_count: snapshot.resource_count(),
            resource_count_change: delta.resource_count_change,
            type_changes: delta
                .type_changes
                .iter()
                .map(|(resource_type, change)| {
                    (
                        resource_type.clone(),
                        ResourceTypeChange {
                            current: change.current,
                            previous: change.previous,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Count change for one resource type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceTypeChange {
    /// Count in this snapshot
    pub current: usize,

    /// Count in the previous snapshot
    pub previous: usize,
}
