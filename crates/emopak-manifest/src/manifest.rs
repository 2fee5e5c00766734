//! The `index.json` manifest model.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Top-level manifest document.
///
/// Every field is optional so partially filled manifests still load. Keys
/// this model does not know are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Target chip, e.g. `esp32s3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chip_model: Option<String>,

    /// Hide the subtitle line on the device display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_subtitle: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_config: Option<DisplayConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<Skin>,

    /// Emoji images, packed in this order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emoji_collection: Vec<Emoji>,

    /// Font blob file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_font: Option<String>,

    /// Speech recognition model blob file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srmodels: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display geometry and color mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monochrome: Option<bool>,
    /// Pixel format, e.g. `RGB565`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Light and dark theme settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<Theme>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One theme's colors and optional background image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An emoji slot and the image file that fills it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Emoji {
    /// Emoji `name` backed by `name.png`.
    pub fn png(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file: Some(format!("{name}.png")),
            extra: Map::new(),
        }
    }
}

/// Which theme a background belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Light,
    Dark,
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// Why a file is part of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRole {
    /// The manifest itself.
    Manifest,
    /// An emoji image, with its slot name.
    Emoji(String),
    TextFont,
    SrModels,
    /// A theme background image.
    Background(ThemeKind),
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => f.write_str("manifest"),
            Self::Emoji(name) if name.is_empty() => f.write_str("emoji"),
            Self::Emoji(name) => write!(f, "emoji '{name}'"),
            Self::TextFont => f.write_str("text font"),
            Self::SrModels => f.write_str("speech models"),
            Self::Background(kind) => write!(f, "{kind} background"),
        }
    }
}

/// A file referenced from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef<'m> {
    pub role: AssetRole,
    /// File name relative to the asset directory; also the packed name.
    pub file: &'m str,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingManifest(path.to_path_buf()));
        }

        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::InvalidManifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize as pretty-printed JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Files this manifest asks to be packed, in pack order: emoji images,
    /// text font, speech models, light background, dark background.
    ///
    /// Entries with no file or an empty file name are left out.
    pub fn asset_refs(&self) -> Vec<AssetRef<'_>> {
        let mut refs = Vec::new();

        for emoji in &self.emoji_collection {
            if let Some(file) = non_empty(emoji.file.as_deref()) {
                refs.push(AssetRef {
                    role: AssetRole::Emoji(emoji.name.clone()),
                    file,
                });
            }
        }

        if let Some(file) = non_empty(self.text_font.as_deref()) {
            refs.push(AssetRef {
                role: AssetRole::TextFont,
                file,
            });
        }

        if let Some(file) = non_empty(self.srmodels.as_deref()) {
            refs.push(AssetRef {
                role: AssetRole::SrModels,
                file,
            });
        }

        if let Some(skin) = &self.skin {
            let themes = [
                (ThemeKind::Light, skin.light.as_ref()),
                (ThemeKind::Dark, skin.dark.as_ref()),
            ];
            for (kind, theme) in themes {
                let image = theme.and_then(|t| non_empty(t.background_image.as_deref()));
                if let Some(file) = image {
                    refs.push(AssetRef {
                        role: AssetRole::Background(kind),
                        file,
                    });
                }
            }
        }

        refs
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
