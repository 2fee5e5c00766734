//! Asset manifest handling for emopak.
//!
//! An asset directory is described by an `index.json` manifest listing the
//! emoji images, optional font and speech-model blobs, and optional theme
//! background images. This crate reads that manifest, gathers the files it
//! names into [`Asset`](emopak_archive::Asset)s ready for packing, and writes
//! starter templates.
//!
//! Image dimensions are looked up through an [`ImageProber`] passed in by the
//! caller. With the `image-probe` feature (on by default) the `image` crate
//! reads dimensions from file headers; without it every asset gets `0x0`.
//!
//! # Example
//!
//! ```no_run
//! use emopak_manifest::{collect_assets, default_prober, CollectOptions};
//!
//! let prober = default_prober();
//! let collection = collect_assets("./my_assets", &CollectOptions::default(), prober.as_ref())?;
//!
//! for warning in &collection.warnings {
//!     eprintln!("warning: {warning}");
//! }
//!
//! let image = collection.to_builder().build()?;
//! std::fs::write("assets.bin", image)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod collect;
mod error;
mod manifest;
mod probe;
mod template;

pub use collect::{collect_assets, CollectOptions, CollectWarning, CollectedAsset, Collection};
pub use error::{Error, Result};
pub use manifest::{AssetRef, AssetRole, DisplayConfig, Emoji, Manifest, Skin, Theme, ThemeKind};
pub use probe::{default_prober, is_image_name, ImageProber, NullProber};
pub use template::{write_template, DEFAULT_EMOJIS};

#[cfg(feature = "image-probe")]
pub use probe::ImageCrateProber;

/// File name of the manifest inside an asset directory.
pub const MANIFEST_FILE: &str = "index.json";
