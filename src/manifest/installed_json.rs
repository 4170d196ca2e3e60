//! vendor/composer/installed.json loader
//!
//! Composer 1 writes a bare array of packages:
//!
//! ```json
//! [{"name": "acme/widget", "version": "1.0.0", ...}]
//! ```
//!
//! Composer 2 wraps the same array in an object:
//!
//! ```json
//! {"packages": [{"name": "acme/widget", "version": "1.0.0", ...}], "dev": true}
//! ```

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::manifest::error::ManifestError;
use crate::manifest::types::InstalledPackage;

/// Layout of the installed manifest, detected from its structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestSchema {
    /// Top-level array of packages (Composer 1)
    PackageList,
    /// Object carrying a `packages` array (Composer 2)
    PackagesObject,
}

/// Detect the manifest layout from the parsed document
pub fn detect_schema(document: &Value) -> Option<ManifestSchema> {
    match document {
        Value::Array(_) => Some(ManifestSchema::PackageList),
        Value::Object(map) if map.get("packages").is_some_and(Value::is_array) => {
            Some(ManifestSchema::PackagesObject)
        }
        _ => None,
    }
}

/// Parse manifest content into a flat list of installed packages
pub fn parse_installed(path: &Path, content: &str) -> Result<Vec<InstalledPackage>, ManifestError> {
    let parse_err = |source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let document: Value = serde_json::from_str(content).map_err(parse_err)?;

    let packages = match (detect_schema(&document), document) {
        (Some(ManifestSchema::PackageList), list) => list,
        (Some(ManifestSchema::PackagesObject), Value::Object(mut map)) => {
            map.remove("packages").unwrap_or_default()
        }
        _ => {
            warn!("Unrecognized manifest layout in {}", path.display());
            return Err(ManifestError::UnrecognizedShape {
                path: path.to_path_buf(),
            });
        }
    };

    serde_json::from_value(packages).map_err(parse_err)
}

/// Read and parse the installed manifest at `path`
pub fn load_installed_packages(path: &Path) -> Result<Vec<InstalledPackage>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        warn!("Failed to read manifest {}: {}", path.display(), source);
        ManifestError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let packages = parse_installed(path, &content)?;
    debug!(
        "Loaded {} installed packages from {}",
        packages.len(),
        path.display()
    );

    Ok(packages)
}
