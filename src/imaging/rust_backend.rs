//! Pure Rust image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Capture time | `kamadak-exif`, via [`metadata`](crate::metadata) |
//! | Embed | PNG passed through as-is; JPEG/TIFF/WebP decoded and re-encoded to PNG |

use super::backend::{BackendError, Dimensions, EmbeddedImage, ImageBackend};
use crate::metadata::try_get_capture_timestamp;
use crate::types::CaptureTimestamp;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Extensions whose decoders are compiled in.
const READABLE_EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Whether an extension (without the dot, any case) can be decoded.
pub fn is_readable_extension(ext: &str) -> bool {
    READABLE_EXTENSIONS
        .iter()
        .any(|(e, fmt)| e.eq_ignore_ascii_case(ext) && fmt.reading_enabled())
}

/// Backend on top of the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unreadable(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Unreadable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| unreadable(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn capture_time(&self, path: &Path) -> Option<CaptureTimestamp> {
        try_get_capture_timestamp(path)
    }

    fn embeddable_png(&self, path: &Path) -> Result<EmbeddedImage, BackendError> {
        let bytes = std::fs::read(path)?;
        let format = image::guess_format(&bytes).map_err(|e| unreadable(path, e))?;

        if format == ImageFormat::Png {
            let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format)
                .into_dimensions()
                .map_err(|e| unreadable(path, e))?;
            return Ok(EmbeddedImage {
                png: bytes,
                dimensions: Dimensions { width, height },
            });
        }

        let img = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| unreadable(path, e))?;
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to re-encode {} as PNG: {e}",
                path.display()
            ))
        })?;
        Ok(EmbeddedImage {
            png: png.into_inner(),
            dimensions: Dimensions {
                width: img.width(),
                height: img.height(),
            },
        })
    }
}
