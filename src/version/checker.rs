//! Upgrade status of an installed package

use std::fmt;

use crate::version::normalized::{CompareResult, compare_versions, normalize_version};

/// Status of the installed version relative to the newest stable release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Installed version is the newest stable release
    Latest,
    /// A newer stable release exists
    Outdated,
    /// Installed version is ahead of the newest stable release (dev or pre-release)
    Newer,
    /// No stable release known, or the installed version is not comparable
    Unknown,
}

impl UpdateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStatus::Latest => "latest",
            UpdateStatus::Outdated => "outdated",
            UpdateStatus::Newer => "newer",
            UpdateStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare an installed package against the newest stable release.
///
/// `installed_normalized` is preferred when the manifest carries it; otherwise
/// the raw installed version is normalized on the fly.
pub fn check_update(
    installed_version: &str,
    installed_normalized: Option<&str>,
    newest_normalized: Option<&str>,
) -> UpdateStatus {
    let Some(newest) = newest_normalized else {
        return UpdateStatus::Unknown;
    };

    let installed = match installed_normalized {
        Some(normalized) => normalized.to_string(),
        None => match normalize_version(installed_version) {
            Some(normalized) => normalized.to_string(),
            None => return UpdateStatus::Unknown,
        },
    };

    match compare_versions(&installed, newest) {
        CompareResult::Latest => UpdateStatus::Latest,
        CompareResult::Outdated => UpdateStatus::Outdated,
        CompareResult::Newer => UpdateStatus::Newer,
        CompareResult::Invalid => UpdateStatus::Unknown,
    }
}
