//! Wire types for the snapshot archive API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Listing of object keys stored in the archive
#[derive(Debug, Clone, Deserialize)]
pub struct KeyListing {
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Listing of every stored version of one object key
#[derive(Debug, Clone, Deserialize)]
pub struct VersionListing {
    /// Object key the versions belong to
    #[serde(default)]
    pub key: String,

    /// Stored versions, in the order the archive returns them
    #[serde(default)]
    pub versions: Vec<ObjectVersion>,
}

/// One stored version of an object
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectVersion {
    /// Opaque version identifier
    pub version_id: String,

    /// When this version was written
    pub last_modified: DateTime<Utc>,
}
