use chrono::Duration;
use pretty_assertions::assert_eq;
use tfstate_history::history::{compute_deltas, group_by_lineage, order_by_serial, TypeChange};
use tfstate_history::parser::{derive_captured_at, ResourceRecord, Snapshot};

/// Build a snapshot with `count` resources per listed type
fn snapshot(lineage: &str, serial: u64, types: &[(&str, usize)], source_name: &str) -> Snapshot {
    let mut resources = Vec::new();
    for (resource_type, count) in types {
        for index in 0..*count {
            resources.push(ResourceRecord {
                mode: "managed".to_string(),
                resource_type: (*resource_type).to_string(),
                name: format!("{}_{}", resource_type, index),
                provider: None,
            });
        }
    }

    Snapshot {
        lineage: lineage.to_string(),
        serial,
        resources,
        recorded_identity: None,
        source_name: source_name.to_string(),
        captured_at: derive_captured_at(source_name),
    }
}

/// Shorthand for a snapshot with `count` resources of one type
fn sized_snapshot(lineage: &str, serial: u64, count: usize, source_name: &str) -> Snapshot {
    snapshot(lineage, serial, &[("aws_instance", count)], source_name)
}

#[test]
fn test_group_partition_complete_and_exclusive() {
    let snapshots = vec![
        sized_snapshot("a", 1, 1, "a1.tfstate"),
        sized_snapshot("b", 1, 1, "b1.tfstate"),
        sized_snapshot("a", 2, 1, "a2.tfstate"),
        sized_snapshot("", 1, 1, "anon.tfstate"),
    ];

    let groups = group_by_lineage(snapshots);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[""].len(), 1);
    assert_eq!(groups["a"].len(), 2);
    assert_eq!(groups["b"].len(), 1);

    // Every member carries its group's lineage
    for (lineage, members) in &groups {
        for member in members {
            assert_eq!(&member.lineage, lineage);
        }
    }

    // Input order preserved within the group
    assert_eq!(groups["a"][0].source_name, "a1.tfstate");
    assert_eq!(groups["a"][1].source_name, "a2.tfstate");
}

#[test]
fn test_order_by_serial_ascending() {
    let group = vec![
        sized_snapshot("l", 3, 1, "third.tfstate"),
        sized_snapshot("l", 1, 1, "first.tfstate"),
        sized_snapshot("l", 2, 1, "second.tfstate"),
    ];

    let ordered = order_by_serial(group);
    let serials: Vec<u64> = ordered.iter().map(|s| s.serial).collect();
    assert_eq!(serials, vec![1, 2, 3]);
}

#[test]
fn test_order_is_stable_and_idempotent() {
    let group = vec![
        sized_snapshot("l", 3, 1, "n1.tfstate"),
        sized_snapshot("l", 1, 1, "n2.tfstate"),
        sized_snapshot("l", 3, 1, "n3.tfstate"),
        sized_snapshot("l", 2, 1, "n4.tfstate"),
    ];

    let once = order_by_serial(group);

    // Equal serials keep their original relative order
    let names: Vec<&str> = once.iter().map(|s| s.source_name.as_str()).collect();
    assert_eq!(names, vec!["n2.tfstate", "n4.tfstate", "n1.tfstate", "n3.tfstate"]);

    let twice = order_by_serial(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_one_delta_per_snapshot_first_empty() {
    let ordered = vec![
        sized_snapshot("l", 1, 4, "s1.tfstate"),
        sized_snapshot("l", 2, 4, "s2.tfstate"),
        sized_snapshot("l", 3, 6, "s3.tfstate"),
    ];

    let deltas = compute_deltas(&ordered);

    assert_eq!(deltas.len(), ordered.len());
    assert_eq!(deltas[0].resource_count_change, 0);
    assert!(deltas[0].type_changes.is_empty());
    assert!(deltas[0].elapsed.is_none());
}

#[test]
fn test_resource_count_change_sequence() {
    let counts = [5usize, 5, 8, 8, 3];
    let ordered: Vec<Snapshot> = counts
        .iter()
        .enumerate()
        .map(|(index, &count)| {
            sized_snapshot("l", index as u64 + 1, count, &format!("s{}.tfstate", index))
        })
        .collect();

    let deltas = compute_deltas(&ordered);
    let changes: Vec<i64> = deltas[1..].iter().map(|d| d.resource_count_change).collect();

    assert_eq!(changes, vec![0, 3, 0, -5]);
}

#[test]
fn test_type_change_detection() {
    let before = snapshot(
        "l",
        1,
        &[("aws_s3_bucket", 2), ("aws_iam_role", 1)],
        "a.tfstate",
    );
    let after = snapshot(
        "l",
        2,
        &[("aws_s3_bucket", 2), ("aws_iam_role", 2), ("aws_vpc", 1)],
        "b.tfstate",
    );

    let deltas = compute_deltas(&[before, after]);
    let changes = &deltas[1].type_changes;

    assert_eq!(
        changes.get("aws_iam_role"),
        Some(&TypeChange { current: 2, previous: 1 })
    );
    assert_eq!(
        changes.get("aws_vpc"),
        Some(&TypeChange { current: 1, previous: 0 })
    );
    // Unchanged type is omitted
    assert!(!changes.contains_key("aws_s3_bucket"));
}

#[test]
fn test_disappeared_type_not_reported() {
    // Only types present in the current snapshot are considered
    let before = snapshot(
        "l",
        1,
        &[("aws_s3_bucket", 2), ("aws_iam_role", 2)],
        "a.tfstate",
    );
    let after = snapshot("l", 2, &[("aws_s3_bucket", 2)], "b.tfstate");

    let deltas = compute_deltas(&[before, after]);

    assert_eq!(deltas[1].resource_count_change, -2);
    assert!(deltas[1].type_changes.is_empty());
}

#[test]
fn test_elapsed_continuity_skips_unparseable() {
    let ordered = vec![
        sized_snapshot("l", 1, 1, "v1-20240101T000000Z.tfstate"),
        sized_snapshot("l", 2, 1, "v2-BADSUFFIX.tfstate"),
        sized_snapshot("l", 3, 1, "v3-20240101T010000Z.tfstate"),
    ];

    let deltas = compute_deltas(&ordered);

    // Middle snapshot has no timestamp, so no elapsed there...
    assert!(deltas[1].elapsed.is_none());
    // ...and the third measures against the first, not the second
    assert_eq!(deltas[2].elapsed, Some(Duration::hours(1)));
}

#[test]
fn test_elapsed_between_adjacent_timestamps() {
    let ordered = vec![
        sized_snapshot("l", 1, 1, "v1-20240101T000000Z.tfstate"),
        sized_snapshot("l", 2, 1, "v2-20240103T061530Z.tfstate"),
    ];

    let deltas = compute_deltas(&ordered);

    assert_eq!(
        deltas[1].elapsed,
        Some(Duration::hours(54) + Duration::minutes(15) + Duration::seconds(30))
    );
}

#[test]
fn test_duplicate_serials_still_diffed() {
    let ordered = order_by_serial(vec![
        sized_snapshot("l", 7, 2, "first-write.tfstate"),
        sized_snapshot("l", 7, 5, "second-write.tfstate"),
    ]);

    // Stable sort keeps input order for the tie
    assert_eq!(ordered[0].source_name, "first-write.tfstate");

    let deltas = compute_deltas(&ordered);
    assert_eq!(deltas[1].resource_count_change, 3);
}

#[test]
fn test_empty_inputs() {
    assert!(group_by_lineage(Vec::new()).is_empty());
    assert!(compute_deltas(&[]).is_empty());
}
