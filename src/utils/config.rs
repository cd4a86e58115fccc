//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for snapshot archive requests
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Extension that marks a file as a state snapshot; everything else in
/// the states directory is ignored
pub const STATE_FILE_EXTENSION: &str = "tfstate";

/// Timestamp pattern embedded in snapshot filenames
/// (e.g. `3p9XkQ-20240101T000000Z.tfstate`)
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

// Where the snapshot producer records the identity of the actor that
// wrote the revision, inside the `values` document. Any level may be
// absent or a different shape in older snapshots.
pub const IDENTITY_LOOKUP_PATH: &[&str] =
    &["data", "aws_caller_identity", "current", "user_id"];
