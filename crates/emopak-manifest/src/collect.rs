//! Gathering the files named by a manifest.

use std::fs;
use std::path::{Path, PathBuf};

use emopak_archive::{ArchiveBuilder, Asset};
use thiserror::Error;

use crate::{is_image_name, AssetRole, Error, ImageProber, Manifest, Result, MANIFEST_FILE};

/// Options for [`collect_assets`].
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Pack `index.json` itself as the first entry.
    pub embed_manifest: bool,
}

/// A file read from the asset directory, ready to pack.
#[derive(Debug, Clone)]
pub struct CollectedAsset {
    /// Name written to the image (the manifest's file name).
    pub name: String,
    /// Where the content was read from.
    pub path: PathBuf,
    pub role: AssetRole,
    pub content: Vec<u8>,
    pub width: u16,
    pub height: u16,
}

impl CollectedAsset {
    /// Copy into a packable [`Asset`].
    pub fn to_asset(&self) -> Asset {
        Asset::new(self.name.clone(), self.content.clone()).with_dimensions(self.width, self.height)
    }
}

impl From<CollectedAsset> for Asset {
    fn from(collected: CollectedAsset) -> Self {
        Asset::new(collected.name, collected.content)
            .with_dimensions(collected.width, collected.height)
    }
}

/// A manifest reference that could not be honored. Collection continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectWarning {
    /// The referenced file does not exist.
    #[error("{role} file not found: {}", path.display())]
    MissingAssetFile {
        role: AssetRole,
        name: String,
        path: PathBuf,
    },
}

/// Result of [`collect_assets`].
#[derive(Debug, Clone)]
pub struct Collection {
    /// The parsed manifest.
    pub manifest: Manifest,
    /// Files to pack, in pack order.
    pub assets: Vec<CollectedAsset>,
    /// Skipped references.
    pub warnings: Vec<CollectWarning>,
}

impl Collection {
    /// Queue every collected asset on a fresh builder.
    pub fn to_builder(&self) -> ArchiveBuilder {
        self.assets.iter().map(CollectedAsset::to_asset).collect()
    }

    /// Consume the collection into a builder.
    pub fn into_builder(self) -> ArchiveBuilder {
        self.assets.into_iter().map(Asset::from).collect()
    }

    /// Total content bytes, markers excluded.
    pub fn content_len(&self) -> usize {
        self.assets.iter().map(|a| a.content.len()).sum()
    }
}

/// Read the manifest in `dir` and every file it references.
///
/// Fails if the manifest is missing or malformed, or if a referenced file
/// exists but cannot be read. Missing referenced files become
/// [`CollectWarning::MissingAssetFile`] and are skipped.
pub fn collect_assets<P: AsRef<Path>>(
    dir: P,
    options: &CollectOptions,
    prober: &dyn ImageProber,
) -> Result<Collection> {
    let dir = dir.as_ref();
    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest = Manifest::from_path(&manifest_path)?;

    let mut assets = Vec::new();
    let mut warnings = Vec::new();

    if options.embed_manifest {
        assets.push(CollectedAsset {
            name: MANIFEST_FILE.to_string(),
            content: read_asset(&manifest_path)?,
            path: manifest_path,
            role: AssetRole::Manifest,
            width: 0,
            height: 0,
        });
    }

    for asset_ref in manifest.asset_refs() {
        let path = dir.join(asset_ref.file);

        if !path.is_file() {
            tracing::debug!(file = asset_ref.file, role = %asset_ref.role, "referenced file missing");
            warnings.push(CollectWarning::MissingAssetFile {
                role: asset_ref.role,
                name: asset_ref.file.to_string(),
                path,
            });
            continue;
        }

        let content = read_asset(&path)?;
        let (width, height) = if is_image_name(asset_ref.file) {
            prober.probe(&path)
        } else {
            (0, 0)
        };

        tracing::trace!(
            file = asset_ref.file,
            size = content.len(),
            width,
            height,
            "collected asset"
        );

        assets.push(CollectedAsset {
            name: asset_ref.file.to_string(),
            path,
            role: asset_ref.role,
            content,
            width,
            height,
        });
    }

    tracing::debug!(
        assets = assets.len(),
        warnings = warnings.len(),
        prober = prober.name(),
        dir = %dir.display(),
        "collected assets"
    );

    Ok(Collection {
        manifest,
        assets,
        warnings,
    })
}

fn read_asset(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::ReadAsset {
        path: path.to_path_buf(),
        source,
    })
}
