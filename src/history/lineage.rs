//! Lineage grouping and serial ordering.

use crate::parser::Snapshot;
use std::collections::BTreeMap;

/// Partition snapshots by lineage id
///
/// **Public** - first pipeline stage after parsing
///
/// Pure partition: every snapshot lands in exactly one group, keyed by
/// its own lineage value, and input order is preserved within each
/// group. An empty lineage forms a group of its own. The map iterates
/// in lineage order so report output is deterministic.
pub fn group_by_lineage(snapshots: Vec<Snapshot>) -> BTreeMap<String, Vec<Snapshot>> {
    let mut groups: BTreeMap<String, Vec<Snapshot>> = BTreeMap::new();

    for snapshot in snapshots {
        groups
            .entry(snapshot.lineage.clone())
            .or_default()
            .push(snapshot);
    }

    groups
}

/// Order a lineage group by serial, ascending
///
/// **Public** - second pipeline stage
///
/// The sort is stable: equal serials keep their original relative
/// order, so results are deterministic given a deterministic discovery
/// order. Duplicate serials are not rejected; the diff stage treats
/// adjacent equal-serial snapshots like any other pair.
pub fn order_by_serial(mut group: Vec<Snapshot>) -> Vec<Snapshot> {
    group.sort_by_key(|snapshot| snapshot.serial);
    group
}
