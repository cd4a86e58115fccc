//! Wire schema for Terraform state documents.
//!
//! These structs mirror the subset of the state format the analyzer
//! reads. Unknown and extra fields are ignored on decode, so snapshot
//! formats carrying additional metadata still parse.

use serde::Deserialize;

/// Raw state document as written by the snapshot producer
#[derive(Debug, Clone, Deserialize)]
pub struct StateDocument {
    /// State format version (decoded, otherwise unused)
    #[serde(default)]
    pub version: u64,

    /// Producer version string (decoded, otherwise unused)
    #[serde(default)]
    pub terraform_version: String,

    /// Producer-assigned revision counter
    #[serde(default)]
    pub serial: u64,

    /// Stable identifier shared by all revisions of one state
    #[serde(default)]
    pub lineage: String,

    /// Resource inventory at this revision
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,

    /// Arbitrarily nested values document; read only for the identity lookup
    #[serde(default)]
    pub values: Option<serde_json::Value>,
}

/// One resource entry in the state inventory
///
/// Duplicates by (type, name) are kept as-is; the resource count is
/// exactly the inventory length.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecord {
    #[serde(default)]
    pub mode: String,

    #[serde(default, rename = "type")]
    pub resource_type: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub provider: Option<String>,
}
