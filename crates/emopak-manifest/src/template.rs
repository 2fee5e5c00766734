//! Starter manifest for a new asset directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Map;

use crate::{DisplayConfig, Emoji, Error, Manifest, Result, Skin, Theme, MANIFEST_FILE};

/// Emoji slots the firmware knows about, in display order.
pub const DEFAULT_EMOJIS: [&str; 21] = [
    "neutral",
    "happy",
    "laughing",
    "funny",
    "sad",
    "angry",
    "crying",
    "loving",
    "embarrassed",
    "surprised",
    "shocked",
    "thinking",
    "winking",
    "cool",
    "relaxed",
    "delicious",
    "kissy",
    "confident",
    "sleepy",
    "silly",
    "confused",
];

impl Manifest {
    /// The default manifest for a 240x135 RGB565 display with every emoji
    /// slot mapped to `<name>.png`.
    pub fn template() -> Self {
        Self {
            version: Some(1),
            chip_model: Some("esp32s3".to_string()),
            hide_subtitle: Some(false),
            display_config: Some(DisplayConfig {
                width: Some(240),
                height: Some(135),
                monochrome: Some(false),
                color: Some("RGB565".to_string()),
                extra: Map::new(),
            }),
            skin: Some(Skin {
                light: Some(theme("#000000", "#ffffff")),
                dark: Some(theme("#ffffff", "#121212")),
                extra: Map::new(),
            }),
            emoji_collection: DEFAULT_EMOJIS.iter().map(|name| Emoji::png(name)).collect(),
            text_font: None,
            srmodels: None,
            extra: Map::new(),
        }
    }
}

fn theme(text_color: &str, background_color: &str) -> Theme {
    Theme {
        text_color: Some(text_color.to_string()),
        background_color: Some(background_color.to_string()),
        background_image: None,
        extra: Map::new(),
    }
}

/// Create `dir` if needed and write the template manifest into it.
///
/// An existing `index.json` is overwritten. Returns the manifest path.
pub fn write_template<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(MANIFEST_FILE);
    let json = Manifest::template().to_json_pretty()?;
    fs::write(&path, json).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "wrote template manifest");
    Ok(path)
}
