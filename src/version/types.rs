//! Common types for registry data

use serde::Deserialize;

use crate::version::normalized::NormalizedVersion;
use crate::version::stability::{Stability, parse_stability};

/// A single published version of a package as reported by the registry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRecord {
    /// Version as tagged by the maintainer (e.g., "v2.0.0", "1.1.0-beta")
    pub version: String,
    /// Comparable form computed by the registry (e.g., "2.0.0.0")
    pub version_normalized: String,
    /// SPDX license identifiers declared for this version
    #[serde(default)]
    pub license: Vec<String>,
}

impl VersionRecord {
    pub fn new(version: &str, version_normalized: &str, license: &[&str]) -> Self {
        Self {
            version: version.to_string(),
            version_normalized: version_normalized.to_string(),
            license: license.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn stability(&self) -> Stability {
        parse_stability(&self.version)
    }

    /// Parsed normalized version, or `None` if the registry sent something
    /// that is not a comparable release
    pub fn normalized(&self) -> Option<NormalizedVersion> {
        self.version_normalized.parse().ok()
    }
}
