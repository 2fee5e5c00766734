//! Common utilities for emopak.
//!
//! This crate provides the small building blocks shared by the archive codec
//! and the manifest tooling:
//!
//! - [`BinaryReader`] - Bounds-checked reading of bytes and fixed-layout records
//! - [`checksum`] - The 16-bit additive checksum used by device asset images
//! - [`Error`] - Errors raised while reading raw bytes

mod error;
mod reader;

pub mod checksum;

pub use error::{Error, Result};
pub use reader::{trim_padding, BinaryReader};
