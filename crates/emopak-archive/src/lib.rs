//! Asset image codec.
//!
//! Device firmware loads emoji, fonts and theme backgrounds from a flat
//! binary image flashed into a dedicated partition. This crate builds such
//! images from in-memory assets and reads them back.
//!
//! # File Format
//!
//! All integers are unsigned little-endian.
//!
//! - 12 bytes: header (`entry_count: u32`, `checksum: u32`, `payload_length: u32`)
//! - 44 bytes per entry: directory (`name: [u8; 32]`, `size: u32`, `offset: u32`,
//!   `width: u16`, `height: u16`)
//! - Data section: per entry, the marker `"ZZ"` followed by `size` content bytes
//!
//! The payload is the directory followed by the data section. Entry offsets
//! are relative to the start of the data section and point at the marker.
//! The checksum is the sum of all payload bytes modulo 65536.
//!
//! Decoding is best-effort: only damage that hides the archive's shape is an
//! [`Error`]. Everything else (checksum mismatch, bad names, bad markers) is
//! reported as a [`Diagnostic`] and the remaining entries are still usable.
//!
//! # Example
//!
//! ```
//! use emopak_archive::{ArchiveBuilder, Asset, AssetArchive};
//!
//! let bytes = ArchiveBuilder::new()
//!     .with_asset(Asset::new("happy.png", vec![1, 2, 3]).with_dimensions(32, 32))
//!     .build()?;
//!
//! let archive = AssetArchive::parse(&bytes)?;
//! assert!(archive.checksum_valid());
//! assert_eq!(archive.entries()[0].content, Some(&[1u8, 2, 3][..]));
//! # Ok::<(), emopak_archive::Error>(())
//! ```

mod archive;
mod builder;
mod diagnostic;
mod error;
mod extract;
mod header;

pub use archive::{AssetArchive, AssetEntry};
pub use builder::{ArchiveBuilder, Asset};
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use extract::{ExtractReport, ExtractedFile};
pub use header::{encode_name, ArchiveHeader, RawEntry};

/// Marker bytes preceding every asset in the data section.
pub const MARKER: &[u8; 2] = b"ZZ";

/// Width of the zero-padded name field.
pub const NAME_LEN: usize = 32;

/// Size of the archive header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Size of a directory entry in bytes.
pub const ENTRY_SIZE: usize = 44;
