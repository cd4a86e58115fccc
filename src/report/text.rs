//! Text rendering for lineage chronologies.
//!
//! Pure projections from snapshots and deltas to report text. No I/O
//! happens here; the caller hands the result to a `ReportSink`.

use crate::history::Delta;
use crate::parser::Snapshot;
use crate::report::schema::ParseFailure;
use chrono::Duration;

/// Render the report header
///
/// **Public** - emitted once, before the lineage sections
pub fn render_header(states_dir: &str, failures: &[ParseFailure]) -> String {
    let mut out = String::new();

    out.push_str(&format!("States Directory: {}\n\n", states_dir));

    if !failures.is_empty() {
        out.push_str(&format!(
            "Skipped {} unparseable state files:\n",
            failures.len()
        ));
        for failure in failures {
            out.push_str(&format!("  {}: {}\n", failure.source_name, failure.error));
        }
        out.push('\n');
    }

    out
}

/// Render one lineage section of the report
///
/// **Public** - called once per lineage, in lineage order
///
/// # Arguments
/// * `lineage` - The lineage id (may be empty)
/// * `ordered` - The lineage's snapshots, ordered by serial
/// * `deltas` - Output of `compute_deltas` for `ordered`, index-aligned
///
/// Per snapshot: source name, serial, lineage, timestamp (or a
/// parse-error note), elapsed time since the previous timestamped
/// snapshot, recorded identity, and resource count. The signed count
/// change and the type-change listing only appear when the count
/// actually changed.
pub fn render_lineage(lineage: &str, ordered: &[Snapshot], deltas: &[Delta]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Lineage: {}\n", lineage));
    out.push_str(&format!("Found {} state files\n\n", ordered.len()));

    for (snapshot, delta) in ordered.iter().zip(deltas) {
        out.push_str(&format!("File: {}\n", snapshot.source_name));
        out.push_str(&format!("Serial: {}\n", snapshot.serial));
        out.push_str(&format!("Lineage: {}\n", snapshot.lineage));

        match snapshot.captured_at {
            Some(captured_at) => {
                out.push_str(&format!("Timestamp: {}\n", captured_at.to_rfc3339()));
            }
            None => {
                out.push_str("Timestamp: unavailable (no parseable suffix in file name)\n");
            }
        }

        if let Some(elapsed) = delta.elapsed {
            out.push_str(&format!(
                "Time delta since last change: {}\n",
                format_duration(elapsed)
            ));
        }

        if let Some(identity) = &snapshot.recorded_identity {
            out.push_str(&format!("Recorded identity: {}\n", identity));
        }

        out.push_str(&format!("Resource count: {}\n", snapshot.resource_count()));

        if delta.resource_count_change != 0 {
            out.push_str(&format!(
                "Change in resources: {:+}\n",
                delta.resource_count_change
            ));
            out.push_str("\nResource type changes:\n");
            for (resource_type, change) in &delta.type_changes {
                out.push_str(&format!(
                    "  {}: {} (was {})\n",
                    resource_type, change.current, change.previous
                ));
            }
        }

        out.push_str("---\n");
    }

    out
}

/// Format an elapsed duration as `XhYmZs`
///
/// **Public** - exposed for tests
///
/// Sub-hour durations drop the hour component, sub-minute durations the
/// minute component. Negative durations (snapshots ordered by serial
/// but captured out of wall-clock order) keep their sign.
pub fn format_duration(elapsed: Duration) -> String {
    let total_seconds = elapsed.num_seconds();
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total_seconds = total_seconds.abs();

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}
