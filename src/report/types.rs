//! Report record types

use serde::Serialize;

use crate::manifest::types::InstalledPackage;
use crate::version::checker::{UpdateStatus, check_update};
use crate::version::types::VersionRecord;

/// Installed and newest stable version of a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub name: String,
    pub installed_version: String,
    pub installed_version_licences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_version_licences: Option<Vec<String>>,
    #[serde(skip)]
    installed_normalized: Option<String>,
    #[serde(skip)]
    newest_normalized: Option<String>,
}

impl PackageReport {
    /// Merge an installed package with its newest stable release, if any
    pub fn new(installed: InstalledPackage, newest: Option<VersionRecord>) -> Self {
        let (newest_version, newest_version_licences, newest_normalized) = match newest {
            Some(record) => (
                Some(record.version),
                Some(record.license),
                Some(record.version_normalized),
            ),
            None => (None, None, None),
        };

        Self {
            name: installed.name,
            installed_version: installed.version,
            installed_version_licences: installed.license,
            newest_version,
            newest_version_licences,
            installed_normalized: installed.version_normalized,
            newest_normalized,
        }
    }

    pub fn status(&self) -> UpdateStatus {
        check_update(
            &self.installed_version,
            self.installed_normalized.as_deref(),
            self.newest_normalized.as_deref(),
        )
    }
}
