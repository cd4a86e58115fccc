//! Terraform State History CLI
//!
//! Groups versioned state snapshots by lineage and reports how each
//! lineage changed over time: resource counts, per-type deltas, elapsed
//! time between revisions, and the identity that wrote each revision.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use tfstate_history::commands::{
    execute_analyze, execute_fetch, validate_analyze_args, validate_fetch_args, AnalyzeArgs,
    FetchArgs,
};
use tfstate_history::parser::parse_snapshot;
use tfstate_history::utils::config::SCHEMA_VERSION;

/// Terraform State History - lineage chronology for state snapshots
#[derive(Parser, Debug)]
#[command(name = "tfstate-history")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a directory of state snapshots and write a report
    Analyze {
        /// Directory holding downloaded state snapshots
        #[arg(short, long, env = "STATES_DIR")]
        dir: PathBuf,

        /// Output path for the text report (default: report_<dirname>.txt)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Output path for a JSON copy of the report
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Suppress the terminal copy of the report
        #[arg(short, long)]
        quiet: bool,
    },

    /// Download archived snapshot versions into a local directory
    Fetch {
        /// Base URL of the snapshot archive
        #[arg(short, long, env = "SNAPSHOT_ENDPOINT")]
        endpoint: String,

        /// Object key to fetch (omit to fetch every state key)
        #[arg(short, long, env = "SNAPSHOT_KEY")]
        key: Option<String>,

        /// Directory to download into
        #[arg(short, long, env = "OUTPUT_DIR", default_value = "states")]
        output_dir: PathBuf,
    },

    /// Validate a single state snapshot file
    Validate {
        /// Path to the state file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Pick up .env before clap reads the environment, so STATES_DIR and
    // the SNAPSHOT_* variables can live there. A missing .env is fine.
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            dir,
            report,
            json,
            quiet,
        } => {
            let args = AnalyzeArgs {
                states_dir: dir,
                report_path: report,
                output_json: json,
                quiet,
            };

            // Validate args first
            validate_analyze_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Fetch {
            endpoint,
            key,
            output_dir,
        } => {
            let args = FetchArgs {
                endpoint,
                key,
                output_dir,
            };

            validate_fetch_args(&args)?;

            execute_fetch(args)?;
        }

        Commands::Validate { file } => {
            validate_state_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a single state snapshot file
///
/// **Private** - internal command implementation
fn validate_state_file(file_path: PathBuf) -> Result<()> {
    println!("Validating state file: {}", file_path.display());

    let blob = std::fs::read(&file_path)?;
    let source_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.display().to_string());

    let snapshot = parse_snapshot(&blob, &source_name)?;

    println!("✓ Valid state document");
    println!("  Lineage: {}", snapshot.lineage);
    println!("  Serial: {}", snapshot.serial);
    println!("  Resources: {}", snapshot.resource_count());
    match snapshot.captured_at {
        Some(captured_at) => println!("  Captured: {}", captured_at.to_rfc3339()),
        None => println!("  Captured: unknown (no timestamp suffix in file name)"),
    }
    if let Some(identity) = &snapshot.recorded_identity {
        println!("  Recorded identity: {}", identity);
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Terraform State History v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Lineage chronology and diff reports for Terraform state snapshots.");
}
