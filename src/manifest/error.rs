use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest unreadable: {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Manifest unreadable: {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Manifest unreadable: {path} is neither a package list nor an object with \"packages\"")]
    UnrecognizedShape { path: PathBuf },
}
