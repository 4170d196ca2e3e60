//! Packagist registry API implementation

use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::VersionRecord;

/// Response from the Packagist package endpoint
#[derive(Debug, Deserialize)]
struct PackagistResponse {
    package: PackagistPackage,
}

#[derive(Debug, Deserialize)]
struct PackagistPackage {
    /// Keyed by version string; entry order matters for tie-breaking
    versions: IndexMap<String, serde_json::Value>,
}

/// Registry implementation for the Packagist JSON API
pub struct PackagistRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PackagistRegistry {
    /// Creates a new PackagistRegistry with a custom base URL and request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent("composer-status")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn package_url(&self, package_name: &str) -> String {
        format!("{}/packages/{}.json", self.base_url, package_name)
    }
}

#[async_trait::async_trait]
impl Registry for PackagistRegistry {
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<Vec<VersionRecord>, RegistryError> {
        let url = self.package_url(package_name);
        debug!("Fetching Packagist package: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("Packagist returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package_info: PackagistResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Packagist response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let records: Vec<VersionRecord> = package_info
            .package
            .versions
            .into_iter()
            .filter_map(|(key, value)| {
                serde_json::from_value::<VersionRecord>(value)
                    .inspect_err(|e| {
                        debug!(
                            "Skipping malformed version entry {} of {}: {}",
                            key, package_name, e
                        )
                    })
                    .ok()
            })
            .collect();

        debug!(
            "Found {} versions for package {}",
            records.len(),
            package_name
        );

        Ok(records)
    }
}
