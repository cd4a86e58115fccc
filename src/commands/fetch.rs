//! Fetch command implementation.
//!
//! Downloads every stored version of the configured state objects from
//! the snapshot archive. Files are named
//! `<versionId>-<YYYYMMDDThhmmssZ>.tfstate` under a per-key
//! subdirectory, which is the layout the analyze command's timestamp
//! derivation consumes.

use crate::remote::ArchiveClient;
use crate::utils::config::{FILENAME_TIMESTAMP_FORMAT, STATE_FILE_EXTENSION};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Arguments for the fetch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FetchArgs {
    /// Base URL of the snapshot archive
    pub endpoint: String,

    /// Object key to fetch (None = every key ending in "state")
    pub key: Option<String>,

    /// Directory to download into
    pub output_dir: PathBuf,
}

/// Execute the fetch command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Client construction failures
/// * Key-listing failures (when no key was given)
/// * Directory creation and file write failures
///
/// Per-key version-listing failures and per-version download failures
/// are logged and skipped so one bad object does not abort the rest.
pub fn execute_fetch(args: FetchArgs) -> Result<()> {
    info!("Connecting to snapshot archive: {}", args.endpoint);
    let client = ArchiveClient::new(&args.endpoint).context("Failed to create archive client")?;

    // Step 1: Resolve the object keys to fetch
    let keys = match &args.key {
        Some(key) => vec![key.clone()],
        None => {
            info!("No key given, listing the archive...");
            let keys: Vec<String> = client
                .list_keys()
                .context("Failed to list archive keys")?
                .into_iter()
                .filter(|key| key.ends_with("state"))
                .collect();
            info!("Found {} state keys", keys.len());
            keys
        }
    };

    // Step 2: Download every stored version of every key
    let mut downloaded = 0usize;
    for key in &keys {
        let versions = match client.list_versions(key) {
            Ok(versions) => versions,
            Err(e) => {
                warn!("Failed to list versions for {}: {}", key, e);
                continue;
            }
        };

        let key_dir = args.output_dir.join(key_basename(key));
        std::fs::create_dir_all(&key_dir)
            .with_context(|| format!("Failed to create {}", key_dir.display()))?;

        for version in &versions {
            info!("Downloading version {} of key {}...", version.version_id, key);
            let blob = match client.download_version(key, &version.version_id) {
                Ok(blob) => blob,
                Err(e) => {
                    warn!(
                        "Failed to download version {} of {}: {}",
                        version.version_id, key, e
                    );
                    continue;
                }
            };

            let file_name = format!(
                "{}-{}.{}",
                version.version_id,
                version.last_modified.format(FILENAME_TIMESTAMP_FORMAT),
                STATE_FILE_EXTENSION
            );
            let path = key_dir.join(&file_name);
            std::fs::write(&path, &blob)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            info!("✓ {}", path.display());
            downloaded += 1;
        }
    }

    info!("Downloaded {} snapshot versions", downloaded);
    Ok(())
}

/// Final path component of an object key
///
/// **Private** - keys may be slash-separated paths in the archive
fn key_basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Validate fetch arguments
///
/// **Public** - can be called before execute_fetch for early validation
pub fn validate_fetch_args(args: &FetchArgs) -> Result<()> {
    if args.endpoint.is_empty() {
        anyhow::bail!("Archive endpoint cannot be empty; pass --endpoint or set SNAPSHOT_ENDPOINT");
    }

    if !args.endpoint.starts_with("http://") && !args.endpoint.starts_with("https://") {
        anyhow::bail!("Archive endpoint must start with http:// or https://");
    }

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    Ok(())
}
