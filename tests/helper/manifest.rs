//! Manifest test utilities

use std::path::PathBuf;

use tempfile::TempDir;

/// Write `content` to `<tmp>/vendor/composer/installed.json` and return the project root
pub fn create_test_project(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let manifest = composer_status::config::manifest_path(temp_dir.path());
    std::fs::create_dir_all(manifest.parent().unwrap()).unwrap();
    std::fs::write(&manifest, content).unwrap();

    (temp_dir, manifest)
}
