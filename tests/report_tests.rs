use chrono::Duration;
use tfstate_history::history::compute_deltas;
use tfstate_history::parser::{derive_captured_at, ResourceRecord, Snapshot};
use tfstate_history::report::{format_duration, render_header, render_lineage, ParseFailure};

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

#[test]
fn test_render_header() {
    let text = render_header("states/prod", &[]);
    assert_eq!(text, "States Directory: states/prod\n\n");
}

#[test]
fn test_render_header_lists_failures() {
    let failures = vec![ParseFailure {
        source_name: "broken.tfstate".to_string(),
        error: "JSON deserialization failed: expected value at line 1 column 1".to_string(),
    }];

    let text = render_header("states/prod", &failures);

    assert!(text.contains("Skipped 1 unparseable state files:"));
    assert!(text.contains("broken.tfstate"));
}

#[test]
fn test_render_lineage_growth() {
    let ordered = vec![
        snapshot(
            "lx",
            1,
            &[("aws_s3_bucket", 2)],
            "v1-20240101T000000Z.tfstate",
        ),
        snapshot(
            "lx",
            2,
            &[("aws_s3_bucket", 2), ("aws_vpc", 1)],
            "v2-20240101T020000Z.tfstate",
        ),
    ];
    let deltas = compute_deltas(&ordered);

    let text = render_lineage("lx", &ordered, &deltas);

    assert!(text.contains("Lineage: lx\n"));
    assert!(text.contains("Found 2 state files\n"));
    assert!(text.contains("File: v1-20240101T000000Z.tfstate\n"));
    assert!(text.contains("Serial: 2\n"));
    assert!(text.contains("Timestamp: 2024-01-01T00:00:00+00:00\n"));
    assert!(text.contains("Time delta since last change: 2h0m0s\n"));
    assert!(text.contains("Resource count: 3\n"));
    assert!(text.contains("Change in resources: +2\n"));
    assert!(text.contains("Resource type changes:\n"));
    assert!(text.contains("  aws_vpc: 1 (was 0)\n"));
    // Unchanged type is not listed
    assert!(!text.contains("aws_s3_bucket: 2 (was 2)"));
}

#[test]
fn test_render_lineage_no_change_block_when_count_stable() {
    let ordered = vec![
        snapshot("lx", 1, &[("aws_vpc", 1)], "v1-20240101T000000Z.tfstate"),
        snapshot("lx", 2, &[("aws_vpc", 1)], "v2-20240101T010000Z.tfstate"),
    ];
    let deltas = compute_deltas(&ordered);

    let text = render_lineage("lx", &ordered, &deltas);

    assert!(!text.contains("Change in resources"));
    assert!(!text.contains("Resource type changes"));
}

#[test]
fn test_render_lineage_timestamp_note() {
    let ordered = vec![snapshot("lx", 1, &[], "v1-BADSUFFIX.tfstate")];
    let deltas = compute_deltas(&ordered);

    let text = render_lineage("lx", &ordered, &deltas);

    assert!(text.contains("Timestamp: unavailable"));
    assert!(!text.contains("Time delta since last change"));
}

#[test]
fn test_render_lineage_recorded_identity() {
    let mut with_identity = snapshot("lx", 1, &[], "v1-20240101T000000Z.tfstate");
    with_identity.recorded_identity = Some("AIDAEXAMPLE".to_string());
    let without_identity = snapshot("lx", 2, &[], "v2-20240101T010000Z.tfstate");

    let ordered = vec![with_identity, without_identity];
    let deltas = compute_deltas(&ordered);

    let text = render_lineage("lx", &ordered, &deltas);

    assert_eq!(text.matches("Recorded identity:").count(), 1);
    assert!(text.contains("Recorded identity: AIDAEXAMPLE\n"));
}

#[test]
fn test_render_lineage_separators() {
    let ordered = vec![
        snapshot("lx", 1, &[], "a.tfstate"),
        snapshot("lx", 2, &[], "b.tfstate"),
    ];
    let deltas = compute_deltas(&ordered);

    let text = render_lineage("lx", &ordered, &deltas);
    assert_eq!(text.matches("---\n").count(), 2);
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::seconds(0)), "0s");
    assert_eq!(format_duration(Duration::seconds(30)), "30s");
    assert_eq!(format_duration(Duration::seconds(90)), "1m30s");
    assert_eq!(format_duration(Duration::seconds(3600)), "1h0m0s");
    assert_eq!(format_duration(Duration::seconds(3661)), "1h1m1s");
    assert_eq!(format_duration(Duration::hours(54)), "54h0m0s");
}

#[test]
fn test_format_duration_negative() {
    assert_eq!(format_duration(Duration::seconds(-3600)), "-1h0m0s");
    assert_eq!(format_duration(Duration::seconds(-45)), "-45s");
}
