//! Error types for asset image handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort building, reading or extracting an asset image.
///
/// Recoverable findings during decoding are reported as
/// [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] emopak_common::Error),

    /// Input is shorter than the fixed header.
    #[error("malformed header: need 12 bytes, got {len}")]
    MalformedHeader { len: usize },

    /// Header declares more payload than the input holds.
    #[error("truncated payload: header declares {declared} bytes, only {available} available")]
    TruncatedPayload { declared: u32, available: usize },

    /// Payload is too short for the declared number of directory entries.
    #[error("truncated directory: {entry_count} entries need {needed} bytes, payload has {available}")]
    TruncatedDirectory {
        entry_count: u32,
        needed: u64,
        available: usize,
    },

    /// A value does not fit its 32-bit header field.
    #[error("{field} of {value} does not fit in 32 bits")]
    TooLarge { field: &'static str, value: u64 },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for asset image operations.
pub type Result<T> = std::result::Result<T, Error>;
