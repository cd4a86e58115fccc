//! HTTP client for the versioned snapshot archive.
//!
//! The archive exposes a small JSON API over the stored state objects:
//! key listing, per-key version listing, and version download.

use super::types::{KeyListing, ObjectVersion, VersionListing};
use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::FetchError;
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

/// Client for listing and downloading archived snapshot versions
pub struct ArchiveClient {
    client: Client,
    base_url: String,
}

impl ArchiveClient {
    /// Create a new archive client
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    /// List every object key stored in the archive
    pub fn list_keys(&self) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/keys", self.base_url);
        debug!("GET {}", url);

        let response = self.get_checked(&url, None)?;
        let listing: KeyListing = response.json().map_err(FetchError::RequestFailed)?;

        Ok(listing.keys)
    }

    /// List the stored versions of one object key
    ///
    /// # Errors
    /// * `FetchError::KeyNotFound` - The archive has no such key
    /// * `FetchError::RequestFailed` / `InvalidResponse` - Transport or
    ///   protocol failures
    pub fn list_versions(&self, key: &str) -> Result<Vec<ObjectVersion>, FetchError> {
        let url = format!("{}/objects/{}/versions", self.base_url, key);
        info!("Listing object versions for key: {}", key);

        let response = self.get_checked(&url, Some(key))?;
        let listing: VersionListing = response.json().map_err(FetchError::RequestFailed)?;

        debug!("Key {} has {} stored versions", key, listing.versions.len());
        Ok(listing.versions)
    }

    /// Download one stored version of an object
    pub fn download_version(&self, key: &str, version_id: &str) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}/objects/{}/versions/{}", self.base_url, key, version_id);
        debug!("GET {}", url);

        let response = self.get_checked(&url, Some(key))?;
        let blob = response.bytes().map_err(FetchError::RequestFailed)?;

        Ok(blob.to_vec())
    }

    /// GET a URL and map error statuses to typed failures
    ///
    /// **Private** - internal helper
    fn get_checked(&self, url: &str, key: Option<&str>) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(FetchError::RequestFailed)?;

        if response.status() == StatusCode::NOT_FOUND {
            if let Some(key) = key {
                return Err(FetchError::KeyNotFound(key.to_string()));
            }
        }

        if !response.status().is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        Ok(response)
    }
}

/// Strip trailing slashes so URL assembly is uniform
///
/// **Private** - internal utility
fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
