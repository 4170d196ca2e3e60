//! Common types for installed packages

use serde::Deserialize;

/// A package recorded in the local install manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledPackage {
    /// Package name (e.g., "laravel/framework")
    pub name: String,
    /// Installed version as written by Composer (e.g., "v10.2.1", "dev-main")
    pub version: String,
    /// SPDX license identifiers of the installed version
    #[serde(default)]
    pub license: Vec<String>,
    /// Comparable form of `version`, when the manifest carries one
    #[serde(default)]
    pub version_normalized: Option<String>,
}
