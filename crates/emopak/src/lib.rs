//! emopak - pack, unpack and scaffold device asset images.
//!
//! This crate provides a unified interface to the emopak crates.
//!
//! # Crates
//!
//! - [`emopak_common`] - Common utilities (binary reading, checksum)
//! - [`emopak_archive`] - Asset image encoding, decoding and extraction
//! - [`emopak_manifest`] - `index.json` handling, asset collection, templates
//!
//! # Example
//!
//! ```no_run
//! use emopak::prelude::*;
//!
//! // Pack a directory
//! let prober = default_prober();
//! let collection = collect_assets("my_assets", &CollectOptions::default(), prober.as_ref())?;
//! collection.to_builder().write_to_file("assets.bin")?;
//!
//! // And unpack it again
//! let data = std::fs::read("assets.bin")?;
//! let archive = AssetArchive::parse(&data)?;
//! for diagnostic in archive.diagnostics() {
//!     eprintln!("warning: {diagnostic}");
//! }
//! archive.extract_to("extracted", |_| {})?;
//! # Ok::<(), emopak::Error>(())
//! ```

use thiserror::Error;

// Re-export all sub-crates
pub use emopak_archive as archive;
pub use emopak_common as common;
pub use emopak_manifest as manifest;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use emopak_archive::{
        ArchiveBuilder, Asset, AssetArchive, AssetEntry, Diagnostic, ExtractReport,
    };
    pub use emopak_common::checksum;
    pub use emopak_manifest::{
        collect_assets, default_prober, write_template, CollectOptions, CollectWarning,
        Collection, ImageProber, Manifest, NullProber,
    };
}

/// Any error raised by the emopak crates.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset image error.
    #[error(transparent)]
    Archive(#[from] emopak_archive::Error),

    /// Manifest error.
    #[error(transparent)]
    Manifest(#[from] emopak_manifest::Error),
}

/// Result type for the facade.
pub type Result<T> = std::result::Result<T, Error>;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[cfg(feature = "full")]
    #[test]
    fn test_full_enables_all_features() {
        assert!(cfg!(feature = "image-probe"));
        assert!(cfg!(feature = "parallel"));
    }
}
