//! Builder for constructing asset images.

use std::fs;
use std::path::Path;

use emopak_common::checksum::Sum16;
use zerocopy::IntoBytes;

use crate::header::{ArchiveHeader, RawEntry};
use crate::{Error, Result, HEADER_SIZE, MARKER};

/// An asset waiting to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Name written to the directory (truncated to 32 bytes on build).
    pub name: String,
    /// Raw file content.
    pub content: Vec<u8>,
    /// Pixel width, 0 for non-images.
    pub width: u16,
    /// Pixel height, 0 for non-images.
    pub height: u16,
}

impl Asset {
    /// Create an asset with no dimensions.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            width: 0,
            height: 0,
        }
    }

    /// Set the pixel dimensions.
    pub fn with_dimensions(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Builder for asset images.
///
/// Assets are written in insertion order. Building never reorders,
/// deduplicates or validates names; that is the caller's business.
///
/// # Example
///
/// ```
/// use emopak_archive::{ArchiveBuilder, Asset};
///
/// let mut builder = ArchiveBuilder::new();
/// builder.push(Asset::new("font.bin", vec![0u8; 10]));
/// builder.push(Asset::new("neutral.png", vec![0u8; 10]).with_dimensions(32, 32));
///
/// let bytes = builder.build().unwrap();
/// assert_eq!(bytes.len(), 12 + 2 * 44 + 2 * (2 + 10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    assets: Vec<Asset>,
}

impl ArchiveBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an asset.
    pub fn push(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Append an asset, builder style.
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    /// Number of assets queued.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Assets queued so far, in pack order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Build the binary image.
    pub fn build(&self) -> Result<Vec<u8>> {
        // Step 1: Lay out the data section and the directory side by side
        let entry_count = to_u32("entry count", self.assets.len())?;
        let data_len: usize = self
            .assets
            .iter()
            .map(|a| MARKER.len() + a.content.len())
            .sum();

        let mut directory = Vec::with_capacity(self.assets.len() * RawEntry::SIZE);
        let mut data = Vec::with_capacity(data_len);

        for asset in &self.assets {
            let offset = to_u32("asset offset", data.len())?;
            let size = to_u32("asset size", asset.content.len())?;

            let entry = RawEntry::new(&asset.name, size, offset, asset.width, asset.height);
            directory.extend_from_slice(entry.as_bytes());

            data.extend_from_slice(MARKER);
            data.extend_from_slice(&asset.content);

            tracing::trace!(name = %asset.name, size, offset, "queued asset record");
        }

        // Step 2: Checksum covers directory and data section
        let payload_length = to_u32("payload length", directory.len() + data.len())?;
        let mut checksum = Sum16::new();
        checksum.update(&directory);
        checksum.update(&data);

        let header = ArchiveHeader::new(entry_count, checksum.value(), payload_length);

        // Step 3: Write everything
        let mut output = Vec::with_capacity(HEADER_SIZE + payload_length as usize);
        output.extend_from_slice(header.as_bytes());
        output.extend_from_slice(&directory);
        output.extend_from_slice(&data);

        tracing::debug!(
            entries = entry_count,
            checksum = checksum.value(),
            payload_length,
            "built asset image"
        );

        Ok(output)
    }

    /// Build the image and write it to disk, returning the number of bytes
    /// written.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let bytes = self.build()?;
        fs::write(path, &bytes).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(bytes.len())
    }
}

impl Extend<Asset> for ArchiveBuilder {
    fn extend<I: IntoIterator<Item = Asset>>(&mut self, iter: I) {
        self.assets.extend(iter);
    }
}

impl FromIterator<Asset> for ArchiveBuilder {
    fn from_iter<I: IntoIterator<Item = Asset>>(iter: I) -> Self {
        Self {
            assets: iter.into_iter().collect(),
        }
    }
}

/// Narrow a length to a 32-bit header field.
fn to_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::TooLarge {
        field,
        value: value as u64,
    })
}

#[cfg(test)]
mod tests {
    use emopak_common::checksum::sum16;

    use super::*;
    use crate::{ENTRY_SIZE, NAME_LEN};

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn test_empty_archive() {
        let bytes = ArchiveBuilder::new().build().unwrap();
        assert_eq!(bytes, vec![0u8; HEADER_SIZE]);
    }

    #[test]
    fn test_single_asset_layout() {
        let bytes = ArchiveBuilder::new()
            .with_asset(Asset::new("a", vec![7, 8, 9]).with_dimensions(5, 6))
            .build()
            .unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE + ENTRY_SIZE + 2 + 3);
        assert_eq!(read_u32(&bytes, 0), 1);
        assert_eq!(read_u32(&bytes, 8), (ENTRY_SIZE + 5) as u32);

        let entry = &bytes[HEADER_SIZE..HEADER_SIZE + ENTRY_SIZE];
        assert_eq!(entry[0], b'a');
        assert_eq!(read_u32(entry, NAME_LEN), 3);
        assert_eq!(read_u32(entry, NAME_LEN + 4), 0);
        assert_eq!(&entry[40..44], &[5, 0, 6, 0]);

        assert_eq!(&bytes[HEADER_SIZE + ENTRY_SIZE..], b"ZZ\x07\x08\x09");
    }

    #[test]
    fn test_offsets_account_for_markers() {
        let sizes = [3usize, 0, 17, 1];
        let builder: ArchiveBuilder = sizes
            .iter()
            .enumerate()
            .map(|(i, &len)| Asset::new(format!("f{i}"), vec![0xAA; len]))
            .collect();
        let bytes = builder.build().unwrap();

        let mut expected = 0usize;
        for (i, &len) in sizes.iter().enumerate() {
            let entry = HEADER_SIZE + i * ENTRY_SIZE;
            let offset = read_u32(&bytes, entry + NAME_LEN + 4) as usize;
            assert_eq!(offset, 2 * i + sizes[..i].iter().sum::<usize>());
            assert_eq!(offset, expected);
            expected += 2 + len;
        }
    }

    #[test]
    fn test_checksum_covers_payload() {
        let bytes = ArchiveBuilder::new()
            .with_asset(Asset::new("x.bin", vec![0xFF; 64]))
            .with_asset(Asset::new("y.bin", vec![0x01; 3]))
            .build()
            .unwrap();

        let stored = read_u32(&bytes, 4);
        assert_eq!(stored, u32::from(sum16(&bytes[HEADER_SIZE..])));
        assert!(stored <= 0xFFFF);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.bin");

        let builder = ArchiveBuilder::new().with_asset(Asset::new("a", vec![1]));
        let written = builder.write_to_file(&path).unwrap();

        assert_eq!(written, HEADER_SIZE + ENTRY_SIZE + 3);
        assert_eq!(fs::read(&path).unwrap(), builder.build().unwrap());
    }
}
