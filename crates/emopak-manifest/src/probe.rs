//! Image dimension probing.

use std::path::Path;

/// Extensions treated as images and probed for dimensions.
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Looks up pixel dimensions of image files.
///
/// Probing never fails: anything that cannot be measured is `(0, 0)`.
pub trait ImageProber {
    /// Return `(width, height)` of the image at `path`, or `(0, 0)`.
    fn probe(&self, path: &Path) -> (u16, u16);

    /// Short name for reports.
    fn name(&self) -> &'static str;
}

/// Prober that knows nothing; every image is `0x0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProber;

impl ImageProber for NullProber {
    fn probe(&self, _path: &Path) -> (u16, u16) {
        (0, 0)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Prober backed by the `image` crate. Only file headers are read.
#[cfg(feature = "image-probe")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateProber;

#[cfg(feature = "image-probe")]
impl ImageProber for ImageCrateProber {
    fn probe(&self, path: &Path) -> (u16, u16) {
        match image::image_dimensions(path) {
            Ok((width, height)) => match (u16::try_from(width), u16::try_from(height)) {
                (Ok(width), Ok(height)) => (width, height),
                _ => {
                    tracing::debug!(path = %path.display(), width, height, "image too large for 16-bit dimensions");
                    (0, 0)
                }
            },
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "could not read image dimensions");
                (0, 0)
            }
        }
    }

    fn name(&self) -> &'static str {
        "image"
    }
}

/// The best prober compiled into this build.
pub fn default_prober() -> Box<dyn ImageProber> {
    #[cfg(feature = "image-probe")]
    {
        Box::new(ImageCrateProber)
    }
    #[cfg(not(feature = "image-probe"))]
    {
        Box::new(NullProber)
    }
}

/// Whether a file name has an image extension (case-insensitive).
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)))
}
