//! States directory walker.
//!
//! Supplies the pipeline with raw `(source name, blob)` pairs. Entries
//! are visited in filename order so discovery order is deterministic;
//! the stable serial sort downstream depends on that.

use crate::utils::config::STATE_FILE_EXTENSION;
use crate::utils::error::ScanError;
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// A raw snapshot blob paired with the filename it came from
#[derive(Debug, Clone)]
pub struct SnapshotBlob {
    /// Filename (no directory components)
    pub source_name: String,

    /// Raw file contents
    pub data: Vec<u8>,
}

/// Collect every state file under `dir`, recursively
///
/// **Public** - input collaborator for the analyze command
///
/// Files without the state extension are skipped. Walk and read
/// failures abort the scan; whether to proceed on a partial tree is the
/// caller's decision, not made here.
pub fn scan_states_dir(dir: impl AsRef<Path>) -> Result<Vec<SnapshotBlob>, ScanError> {
    let dir = dir.as_ref();
    let mut blobs = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(STATE_FILE_EXTENSION) {
            continue;
        }

        debug!("Reading state file: {}", path.display());
        let data = std::fs::read(path).map_err(|source| ScanError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        blobs.push(SnapshotBlob {
            source_name: file_name_of(path),
            data,
        });
    }

    Ok(blobs)
}

/// Final path component as a string
///
/// **Private** - internal utility
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
