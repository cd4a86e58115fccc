//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Walks the states directory for snapshot blobs
//! 2. Parses each blob into a Snapshot
//! 3. Groups snapshots by lineage, orders each group by serial
//! 4. Computes pairwise deltas per lineage
//! 5. Renders the chronology into the configured sinks

use crate::history::{compute_deltas, group_by_lineage, order_by_serial};
use crate::parser::parse_snapshot;
use crate::report::{
    render_header, render_lineage, write_report, AnalysisReport, LineageReport, ParseFailure,
    ReportSink,
};
use crate::scan::scan_states_dir;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory holding downloaded state snapshots
    pub states_dir: PathBuf,

    /// Output path for the text report (None = derive from states_dir)
    pub report_path: Option<PathBuf>,

    /// Output path for a JSON copy of the report (optional)
    pub output_json: Option<PathBuf>,

    /// Suppress the terminal copy of the report
    pub quiet: bool,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// Ok if the report was written, Err with context if any stage fails
///
/// # Errors
/// * Directory scan failures
/// * Report file creation/write failures
///
/// A blob that fails to decode is skipped and listed in the report; it
/// never aborts the run.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Analyzing states directory: {}", args.states_dir.display());

    // Step 1: Collect raw blobs
    info!("Step 1/5: Scanning for state files...");
    let blobs = scan_states_dir(&args.states_dir).context("Failed to scan states directory")?;
    info!("Found {} state files", blobs.len());

    // Step 2: Parse each blob; bad blobs are recorded, not fatal
    info!("Step 2/5: Parsing snapshots...");
    let mut snapshots = Vec::with_capacity(blobs.len());
    let mut failures = Vec::new();

    for blob in &blobs {
        match parse_snapshot(&blob.data, &blob.source_name) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                warn!("Skipping {}: {}", blob.source_name, e);
                failures.push(ParseFailure {
                    source_name: blob.source_name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    // Step 3: Group by lineage
    info!("Step 3/5: Grouping {} snapshots by lineage...", snapshots.len());
    let groups = group_by_lineage(snapshots);
    debug!("Found {} lineages", groups.len());

    // Step 4: Order, diff, and render each lineage
    info!("Step 4/5: Computing deltas and rendering report...");
    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| default_report_path(&args.states_dir));

    let mut sink = ReportSink::new();
    if !args.quiet {
        sink = sink.with_stdout();
    }
    sink = sink
        .with_file(&report_path)
        .context("Failed to create report file")?;

    let states_dir_display = args.states_dir.display().to_string();
    sink.emit(&render_header(&states_dir_display, &failures))?;

    let mut json_report = AnalysisReport::new(states_dir_display);
    json_report.parse_failures = failures;

    for (lineage, group) in groups {
        let ordered = order_by_serial(group);
        let deltas = compute_deltas(&ordered);

        sink.emit(&render_lineage(&lineage, &ordered, &deltas))?;
        json_report
            .lineages
            .push(LineageReport::from_parts(&lineage, &ordered, &deltas));
    }

    sink.flush()?;
    info!("✓ Report written to: {}", report_path.display());

    // Step 5: JSON report (if requested)
    if let Some(json_path) = &args.output_json {
        info!("Step 5/5: Writing JSON report...");
        write_report(&json_report, json_path).context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", json_path.display());
    } else {
        info!("Step 5/5: Skipping JSON report (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Derive the default report filename from the states directory
///
/// **Private** - `report_<dirname>.txt` in the working directory
fn default_report_path(states_dir: &Path) -> PathBuf {
    let base = states_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "states".to_string());

    PathBuf::from(format!("report_{}.txt", base.replace('/', "_")))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_analyze_args(args: &AnalyzeArgs) -> Result<()> {
    if args.states_dir.as_os_str().is_empty() {
        anyhow::bail!("States directory cannot be empty; pass --dir or set STATES_DIR");
    }

    if !args.states_dir.is_dir() {
        anyhow::bail!(
            "States directory does not exist: {}",
            args.states_dir.display()
        );
    }

    Ok(())
}
