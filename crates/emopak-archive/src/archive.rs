//! Asset image reader.

use std::borrow::Cow;

use emopak_common::{checksum, BinaryReader};

use crate::header::{ArchiveHeader, RawEntry};
use crate::{Diagnostic, Error, Result, HEADER_SIZE, MARKER};

/// A decoded directory entry.
///
/// Content borrows the buffer the archive was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry<'a> {
    /// Position in the directory.
    pub index: usize,
    /// Entry name. Lossily decoded when the stored bytes are not UTF-8.
    pub name: Cow<'a, str>,
    /// Name bytes as stored, without padding.
    pub raw_name: &'a [u8],
    /// Content length, excluding the marker.
    pub size: u32,
    /// Offset of the record within the data section.
    pub offset: u32,
    /// Pixel width.
    pub width: u16,
    /// Pixel height.
    pub height: u16,
    /// Content bytes, `None` when the entry could not be extracted.
    pub content: Option<&'a [u8]>,
}

impl AssetEntry<'_> {
    /// Whether the content was located and can be written out.
    #[inline]
    pub fn is_extracted(&self) -> bool {
        self.content.is_some()
    }

    /// Whether the stored name is valid UTF-8.
    #[inline]
    pub fn has_valid_name(&self) -> bool {
        matches!(self.name, Cow::Borrowed(_))
    }
}

/// A parsed asset image.
///
/// Parsing is all-or-nothing only for the container's shape (header,
/// payload, directory). Per-entry damage and checksum mismatches end up in
/// [`diagnostics`](Self::diagnostics).
#[derive(Debug, Clone)]
pub struct AssetArchive<'a> {
    header: ArchiveHeader,
    computed_checksum: u16,
    entries: Vec<AssetEntry<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AssetArchive<'a> {
    /// Parse an asset image held in memory.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::MalformedHeader { len: data.len() });
        }

        let mut reader = BinaryReader::new(data);
        let header: ArchiveHeader = reader.read_struct()?;
        let entry_count = header.entry_count();
        let declared = header.payload_length();

        if reader.remaining() < declared as usize {
            return Err(Error::TruncatedPayload {
                declared,
                available: reader.remaining(),
            });
        }
        let payload = reader.read_bytes(declared as usize)?;

        let mut diagnostics = Vec::new();

        let computed_checksum = checksum::sum16(payload);
        if u32::from(computed_checksum) != header.checksum() {
            tracing::debug!(
                stored = header.checksum(),
                computed = computed_checksum,
                "checksum mismatch"
            );
            diagnostics.push(Diagnostic::ChecksumMismatch {
                stored: header.checksum(),
                computed: computed_checksum,
            });
        }

        let directory_len = u64::from(entry_count) * RawEntry::SIZE as u64;
        if (payload.len() as u64) < directory_len {
            return Err(Error::TruncatedDirectory {
                entry_count,
                needed: directory_len,
                available: payload.len(),
            });
        }
        let (directory, data_section) = payload.split_at(directory_len as usize);

        let mut directory = BinaryReader::new(directory);
        let mut entries = Vec::with_capacity(entry_count as usize);

        for index in 0..entry_count as usize {
            let raw: &'a RawEntry = directory.read_ref()?;
            let entry = Self::decode_entry(index, raw, data_section, &mut diagnostics);

            tracing::trace!(
                index,
                name = %entry.name,
                size = entry.size,
                offset = entry.offset,
                extracted = entry.is_extracted(),
                "decoded entry"
            );
            entries.push(entry);
        }

        tracing::debug!(
            entries = entries.len(),
            diagnostics = diagnostics.len(),
            "parsed asset image"
        );

        Ok(Self {
            header,
            computed_checksum,
            entries,
            diagnostics,
        })
    }

    /// Decode one directory entry and locate its record.
    fn decode_entry(
        index: usize,
        raw: &'a RawEntry,
        data_section: &'a [u8],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> AssetEntry<'a> {
        let raw_name = raw.name_bytes();
        let name = match std::str::from_utf8(raw_name) {
            Ok(name) => Cow::Borrowed(name),
            Err(_) => {
                let lossy = String::from_utf8_lossy(raw_name).into_owned();
                diagnostics.push(Diagnostic::InvalidName {
                    index,
                    lossy: lossy.clone(),
                });
                Cow::Owned(lossy)
            }
        };
        let valid_name = matches!(name, Cow::Borrowed(_));

        let (size, offset) = (raw.size(), raw.offset());
        let mut record = BinaryReader::new_at(data_section, offset as usize);

        let content = match record.expect_magic(MARKER) {
            Ok(()) => match record.read_bytes(size as usize) {
                Ok(content) => Some(content),
                Err(_) => {
                    diagnostics.push(Diagnostic::ContentOutOfBounds {
                        index,
                        name: name.to_string(),
                        offset,
                        size,
                    });
                    None
                }
            },
            Err(err) => {
                let found = match err {
                    emopak_common::Error::InvalidMagic { actual, .. } => actual,
                    _ => Vec::new(),
                };
                diagnostics.push(Diagnostic::MagicMismatch {
                    index,
                    name: name.to_string(),
                    found,
                });
                None
            }
        };

        AssetEntry {
            index,
            name,
            raw_name,
            size,
            offset,
            width: raw.width(),
            height: raw.height(),
            content: content.filter(|_| valid_name),
        }
    }

    /// The archive header.
    #[inline]
    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Number of directory entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All entries in directory (pack) order.
    #[inline]
    pub fn entries(&self) -> &[AssetEntry<'a>] {
        &self.entries
    }

    /// Iterate over entries.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &AssetEntry<'a>> + '_ {
        self.entries.iter()
    }

    /// Get entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&AssetEntry<'a>> {
        self.entries.get(index)
    }

    /// Find the first entry with the given name.
    pub fn find(&self, name: &str) -> Option<&AssetEntry<'a>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Checksum stored in the header.
    #[inline]
    pub fn stored_checksum(&self) -> u32 {
        self.header.checksum()
    }

    /// Checksum recomputed over the payload.
    #[inline]
    pub fn computed_checksum(&self) -> u16 {
        self.computed_checksum
    }

    /// Whether the stored checksum matches the payload.
    #[inline]
    pub fn checksum_valid(&self) -> bool {
        u32::from(self.computed_checksum) == self.header.checksum()
    }

    /// Non-fatal findings, in the order they were encountered.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
