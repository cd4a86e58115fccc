//! Pairwise delta computation over an ordered lineage.

use crate::parser::Snapshot;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Count change for a single resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeChange {
    /// Occurrence count in this snapshot
    pub current: usize,

    /// Occurrence count in the previous snapshot (0 when the type is new)
    pub previous: usize,
}

/// Computed difference against the previous snapshot in the lineage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    /// Resource count change; zero for the first snapshot
    pub resource_count_change: i64,

    /// Per-type count changes, keyed by resource type. Only types
    /// present in this snapshot whose count differs from the previous
    /// one appear; empty for the first snapshot.
    pub type_changes: BTreeMap<String, TypeChange>,

    /// Wall-clock distance to the last snapshot whose timestamp parsed
    pub elapsed: Option<Duration>,
}

/// Compute one Delta per snapshot in an ordered lineage
///
/// **Public** - third pipeline stage
///
/// # Arguments
/// * `ordered` - A single lineage, ordered by serial ascending
///
/// # Returns
/// Exactly one Delta per input snapshot, index-aligned
///
/// The first snapshot gets an empty delta: no previous revision, no
/// previous timestamp. `elapsed` is measured against the most recent
/// snapshot whose timestamp parsed, not strictly the previous index, so
/// one unparseable filename does not poison every later delta.
pub fn compute_deltas(ordered: &[Snapshot]) -> Vec<Delta> {
    let mut deltas = Vec::with_capacity(ordered.len());

    let mut previous_count = 0usize;
    let mut previous_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut last_captured_at: Option<DateTime<Utc>> = None;

    for (index, snapshot) in ordered.iter().enumerate() {
        let type_counts = count_by_type(snapshot);
        let mut delta = Delta::default();

        if index > 0 {
            delta.resource_count_change =
                snapshot.resource_count() as i64 - previous_count as i64;
            delta.type_changes = diff_type_counts(&type_counts, &previous_types);
        }

        if let Some(captured_at) = snapshot.captured_at {
            if let Some(reference) = last_captured_at {
                delta.elapsed = Some(captured_at - reference);
            }
            // The reference only advances on a parsed timestamp
            last_captured_at = Some(captured_at);
        }

        previous_count = snapshot.resource_count();
        previous_types = type_counts;
        deltas.push(delta);
    }

    deltas
}

/// Occurrence count per resource type in one snapshot
///
/// **Public** - also used when assembling the JSON report
pub fn count_by_type(snapshot: &Snapshot) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for resource in &snapshot.resources {
        *counts.entry(resource.resource_type.clone()).or_insert(0) += 1;
    }
    counts
}

/// Per-type changes between two count maps
///
/// **Private** - internal helper for compute_deltas
///
/// Only keys present in the current map are considered; a type absent
/// before maps to previous = 0. Types with unchanged counts are
/// omitted.
fn diff_type_counts(
    current: &BTreeMap<String, usize>,
    previous: &BTreeMap<String, usize>,
) -> BTreeMap<String, TypeChange> {
    current
        .iter()
        .filter_map(|(resource_type, &count)| {
            let was = previous.get(resource_type).copied().unwrap_or(0);
            (count != was).then(|| {
                (
                    resource_type.clone(),
                    TypeChange {
                        current: count,
                        previous: was,
                    },
                )
            })
        })
        .collect()
}
