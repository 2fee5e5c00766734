//! Non-fatal findings reported while decoding or extracting.

use thiserror::Error;

/// A problem that does not stop decoding.
///
/// The archive stays usable; affected entries are left unextracted. Callers
/// decide whether any of these should be treated as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Recomputed payload checksum differs from the stored one.
    #[error("checksum mismatch: stored {stored:#06X}, computed {computed:#06X}")]
    ChecksumMismatch { stored: u32, computed: u16 },

    /// Entry name is not valid UTF-8 after stripping its padding.
    #[error("entry {index}: name is not valid UTF-8 ({lossy:?})")]
    InvalidName { index: usize, lossy: String },

    /// The record at the entry's offset does not start with `"ZZ"`.
    #[error("entry {index} ({name}): marker mismatch, found {found:02X?}")]
    MagicMismatch {
        index: usize,
        name: String,
        found: Vec<u8>,
    },

    /// Marker is present but the content runs past the payload.
    #[error("entry {index} ({name}): {size} bytes at offset {offset} run past the data section")]
    ContentOutOfBounds {
        index: usize,
        name: String,
        offset: u32,
        size: u32,
    },

    /// Entry name would resolve outside the extraction directory.
    #[error("entry {index} ({name:?}): name is not a safe relative path, not extracted")]
    UnsafeName { index: usize, name: String },

    /// A later entry extracts to the same path and replaces this one.
    #[error("entry {index} ({name}): same path as entry {by}, not extracted")]
    Superseded {
        index: usize,
        name: String,
        by: usize,
    },
}

impl Diagnostic {
    /// Index of the entry this finding concerns, if any.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::ChecksumMismatch { .. } => None,
            Self::InvalidName { index, .. }
            | Self::MagicMismatch { index, .. }
            | Self::ContentOutOfBounds { index, .. }
            | Self::UnsafeName { index, .. }
            | Self::Superseded { index, .. } => Some(*index),
        }
    }
}
