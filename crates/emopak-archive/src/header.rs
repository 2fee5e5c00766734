//! Header and directory entry structures.
//!
//! Both structures use explicit little-endian field types and have no
//! padding, so their in-memory layout is exactly their on-disk layout on
//! every target.

use emopak_common::trim_padding;
use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{ENTRY_SIZE, HEADER_SIZE, NAME_LEN};

/// Archive header, the first 12 bytes of an asset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct ArchiveHeader {
    /// Number of directory entries.
    pub entry_count: U32,
    /// 16-bit payload checksum, stored widened.
    pub checksum: U32,
    /// Length of directory plus data section.
    pub payload_length: U32,
}

const _: () = assert!(std::mem::size_of::<ArchiveHeader>() == HEADER_SIZE);

impl ArchiveHeader {
    /// Header size in bytes.
    pub const SIZE: usize = HEADER_SIZE;

    /// Create a header.
    pub fn new(entry_count: u32, checksum: u16, payload_length: u32) -> Self {
        Self {
            entry_count: U32::new(entry_count),
            checksum: U32::new(u32::from(checksum)),
            payload_length: U32::new(payload_length),
        }
    }

    #[inline]
    pub fn entry_count(&self) -> u32 {
        self.entry_count.get()
    }

    /// Stored checksum. Only the low 16 bits are meaningful in a
    /// well-formed image, but the full field is kept for reporting.
    #[inline]
    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    #[inline]
    pub fn payload_length(&self) -> u32 {
        self.payload_length.get()
    }
}

/// One directory entry describing a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawEntry {
    /// UTF-8 name, zero-padded.
    pub name: [u8; NAME_LEN],
    /// Content length, excluding the marker.
    pub size: U32,
    /// Offset of the record's marker within the data section.
    pub offset: U32,
    /// Pixel width, 0 for non-images.
    pub width: U16,
    /// Pixel height, 0 for non-images.
    pub height: U16,
}

const _: () = assert!(std::mem::size_of::<RawEntry>() == ENTRY_SIZE);

impl RawEntry {
    /// Entry size in bytes.
    pub const SIZE: usize = ENTRY_SIZE;

    /// Create an entry, truncating the name to fit.
    pub fn new(name: &str, size: u32, offset: u32, width: u16, height: u16) -> Self {
        Self {
            name: encode_name(name),
            size: U32::new(size),
            offset: U32::new(offset),
            width: U16::new(width),
            height: U16::new(height),
        }
    }

    /// Name bytes with the trailing zero padding removed.
    #[inline]
    pub fn name_bytes(&self) -> &[u8] {
        trim_padding(&self.name)
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size.get()
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width.get()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height.get()
    }
}

/// Encode a name into the fixed 32-byte field.
///
/// Names longer than 32 bytes are cut at byte 32 even if that splits a
/// multi-byte character; the firmware compares raw bytes.
pub fn encode_name(name: &str) -> [u8; NAME_LEN] {
    let bytes = name.as_bytes();
    let len = bytes.len().min(NAME_LEN);
    let mut field = [0u8; NAME_LEN];
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = ArchiveHeader::new(2, 0xABCD, 0x0102_0304);
        assert_eq!(
            header.as_bytes(),
            &[2, 0, 0, 0, 0xCD, 0xAB, 0, 0, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_header_parse() {
        let bytes = [3u8, 0, 0, 0, 0x01, 0x02, 0, 0, 100, 0, 0, 0];
        let header = ArchiveHeader::read_from_bytes(&bytes[..]).unwrap();
        assert_eq!(header.entry_count(), 3);
        assert_eq!(header.checksum(), 0x0201);
        assert_eq!(header.payload_length(), 100);
    }

    #[test]
    fn test_entry_layout() {
        let entry = RawEntry::new("happy.png", 0x10, 0x20, 32, 24);
        let bytes = entry.as_bytes();

        assert_eq!(bytes.len(), ENTRY_SIZE);
        assert_eq!(&bytes[..9], b"happy.png");
        assert!(bytes[9..32].iter().all(|&b| b == 0));
        assert_eq!(&bytes[32..36], &[0x10, 0, 0, 0]);
        assert_eq!(&bytes[36..40], &[0x20, 0, 0, 0]);
        assert_eq!(&bytes[40..42], &[32, 0]);
        assert_eq!(&bytes[42..44], &[24, 0]);
    }

    #[test]
    fn test_long_name_is_truncated() {
        let name = "a".repeat(40);
        let entry = RawEntry::new(&name, 0, 0, 0, 0);
        assert_eq!(entry.name_bytes(), &name.as_bytes()[..32]);
    }

    #[test]
    fn test_truncation_may_split_code_point() {
        // 31 ASCII bytes followed by a 3-byte character
        let name = format!("{}{}", "x".repeat(31), '\u{4E2D}');
        let field = encode_name(&name);
        assert_eq!(&field[..31], "x".repeat(31).as_bytes());
        assert_eq!(field[31], 0xE4);
        assert!(std::str::from_utf8(&field).is_err());
    }

    #[test]
    fn test_exact_length_name_has_no_padding() {
        let name = "b".repeat(NAME_LEN);
        let entry = RawEntry::new(&name, 0, 0, 0, 0);
        assert_eq!(entry.name_bytes(), name.as_bytes());
    }
}
