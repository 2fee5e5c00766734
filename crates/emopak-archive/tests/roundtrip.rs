//! Property-based and format-level tests for the asset image codec.

use emopak_archive::{
    ArchiveBuilder, Asset, AssetArchive, Diagnostic, ENTRY_SIZE, HEADER_SIZE, NAME_LEN,
};
use proptest::prelude::*;

/// Names of at most 32 UTF-8 bytes with no NUL characters.
fn name_strategy() -> impl Strategy<Value = String> {
    // At most 8 chars of up to 4 bytes each still fits the field
    prop_oneof!["[a-z0-9_.]{1,32}", "[^\\x00]{1,8}"]
}

fn asset_strategy() -> impl Strategy<Value = Asset> {
    (
        name_strategy(),
        prop::collection::vec(any::<u8>(), 0..256),
        any::<u16>(),
        any::<u16>(),
    )
        .prop_map(|(name, content, width, height)| {
            Asset::new(name, content).with_dimensions(width, height)
        })
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(assets in prop::collection::vec(asset_strategy(), 0..12)) {
        let builder: ArchiveBuilder = assets.iter().cloned().collect();
        let bytes = builder.build().unwrap();
        let archive = AssetArchive::parse(&bytes).unwrap();

        prop_assert!(archive.checksum_valid());
        prop_assert!(archive.diagnostics().is_empty());
        prop_assert_eq!(archive.entry_count(), assets.len());

        let mut offset = 0u32;
        for (entry, asset) in archive.iter().zip(&assets) {
            prop_assert_eq!(&*entry.name, asset.name.as_str());
            prop_assert_eq!(entry.size as usize, asset.content.len());
            prop_assert_eq!(entry.offset, offset);
            prop_assert_eq!((entry.width, entry.height), (asset.width, asset.height));
            prop_assert_eq!(entry.content, Some(asset.content.as_slice()));
            offset += 2 + asset.content.len() as u32;
        }
    }
}

#[test]
fn test_forty_byte_name_is_truncated() {
    let name = "n".repeat(40);
    let bytes = ArchiveBuilder::new()
        .with_asset(Asset::new(name.clone(), vec![0u8; 3]))
        .build()
        .unwrap();

    let field = &bytes[HEADER_SIZE..HEADER_SIZE + NAME_LEN];
    assert_eq!(field, &name.as_bytes()[..32]);

    let archive = AssetArchive::parse(&bytes).unwrap();
    assert_eq!(archive.entries()[0].name, "n".repeat(32));
}

#[test]
fn test_checksum_of_known_payload() {
    // A single 0-byte asset named "\x01" has payload bytes that sum to:
    // name 1 + marker 'Z' + 'Z' = 1 + 90 + 90
    let bytes = ArchiveBuilder::new()
        .with_asset(Asset::new("\u{1}", Vec::new()))
        .build()
        .unwrap();
    let archive = AssetArchive::parse(&bytes).unwrap();
    assert_eq!(archive.stored_checksum(), 181);

    assert_eq!(emopak_common::checksum::sum16(&[0x01, 0x02, 0xFF, 0xFF]), 513);
}

#[test]
fn test_offset_monotonicity() {
    let sizes = [10usize, 0, 255, 1, 42];
    let builder: ArchiveBuilder = sizes
        .iter()
        .enumerate()
        .map(|(i, &len)| Asset::new(format!("asset{i}.bin"), vec![i as u8; len]))
        .collect();
    let bytes = builder.build().unwrap();
    let archive = AssetArchive::parse(&bytes).unwrap();

    for (i, entry) in archive.iter().enumerate() {
        let expected = 2 * i + sizes[..i].iter().sum::<usize>();
        assert_eq!(entry.offset as usize, expected);
    }
}

#[test]
fn test_empty_archive_is_twelve_zero_bytes() {
    let bytes = ArchiveBuilder::new().build().unwrap();
    assert_eq!(bytes, [0u8; HEADER_SIZE]);

    let archive = AssetArchive::parse(&bytes).unwrap();
    assert_eq!(archive.entry_count(), 0);
    assert_eq!(archive.header().payload_length(), 0);
    assert!(archive.checksum_valid());
}

#[test]
fn test_flipped_marker_byte_reports_both_findings() {
    let assets = [
        Asset::new("first.bin", vec![1; 5]),
        Asset::new("second.bin", vec![2; 6]),
        Asset::new("third.bin", vec![3; 7]),
    ];

    for marker_byte in 0..2 {
        let builder: ArchiveBuilder = assets.iter().cloned().collect();
        let mut bytes = builder.build().unwrap();

        // second.bin record starts after first.bin's 2 + 5 bytes
        let record = HEADER_SIZE + assets.len() * ENTRY_SIZE + 7;
        bytes[record + marker_byte] ^= 0xFF;

        let archive = AssetArchive::parse(&bytes).unwrap();

        assert!(!archive.checksum_valid());
        assert!(archive
            .diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::ChecksumMismatch { .. })));
        assert!(archive
            .diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::MagicMismatch { index: 1, .. })));
        assert_eq!(archive.diagnostics().len(), 2);

        assert_eq!(archive.entries()[0].content, Some(&[1u8; 5][..]));
        assert_eq!(archive.entries()[1].content, None);
        assert_eq!(archive.entries()[2].content, Some(&[3u8; 7][..]));
    }
}
