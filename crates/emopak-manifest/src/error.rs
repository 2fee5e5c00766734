//! Error types for manifest handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading manifests or collecting assets.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The asset directory has no manifest.
    #[error("manifest not found: {}", .0.display())]
    MissingManifest(PathBuf),

    /// The manifest exists but is not a valid manifest document.
    #[error("invalid manifest {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A referenced file exists but could not be read.
    #[error("failed to read asset {}: {source}", path.display())]
    ReadAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;
