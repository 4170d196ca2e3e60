//! Registry test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use composer_status::version::error::RegistryError;
use composer_status::version::registry::Registry;
use composer_status::version::types::VersionRecord;

/// Map-backed registry for testing
///
/// Packages without registered versions answer with `NotFound`, packages
/// registered through `with_failure` answer with `InvalidResponse`.
pub struct MockRegistry {
    versions: HashMap<String, Vec<VersionRecord>>,
    failing: Vec<String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            versions: HashMap::new(),
            failing: Vec::new(),
        }
    }

    /// Register versions whose normalized form is the version padded to four segments
    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        let records = versions
            .into_iter()
            .map(|v| VersionRecord::new(v, &pad_normalized(v), &["MIT"]))
            .collect();
        self.versions.insert(package.to_string(), records);
        self
    }

    pub fn with_records(mut self, package: &str, records: Vec<VersionRecord>) -> Self {
        self.versions.insert(package.to_string(), records);
        self
    }

    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.push(package.to_string());
        self
    }
}

/// "1.1.0-beta" -> "1.1.0.0-beta"
fn pad_normalized(version: &str) -> String {
    let (release, suffix) = match version.split_once('-') {
        Some((release, suffix)) => (release, format!("-{}", suffix)),
        None => (version, String::new()),
    };
    let mut segments: Vec<&str> = release.split('.').collect();
    while segments.len() < 4 {
        segments.push("0");
    }
    format!("{}{}", segments.join("."), suffix)
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_all_versions(
        &self,
        package_name: &str,
    ) -> Result<Vec<VersionRecord>, RegistryError> {
        if self.failing.iter().any(|p| p == package_name) {
            return Err(RegistryError::InvalidResponse(format!(
                "simulated failure for {}",
                package_name
            )));
        }

        match self.versions.get(package_name) {
            Some(records) => Ok(records.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}
