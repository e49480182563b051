//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between page layout and pixels.
//! Everything above it (scan ordering, page fitting, document assembly) is
//! backend-agnostic, so tests swap in a recording mock instead of real files.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! and `kamadak-exif` crates.

use crate::types::CaptureTimestamp;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read image {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Native pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// PNG-encoded image ready to embed, plus its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub png: Vec<u8>,
    pub dimensions: Dimensions,
}

/// Operations every backend supports.
pub trait ImageBackend {
    /// Native pixel dimensions. Fails for unreadable or corrupt images.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Original capture time, if the file carries one. Never fails.
    fn capture_time(&self, path: &Path) -> Option<CaptureTimestamp>;

    /// Image bytes in a form the document writer can embed (PNG).
    fn embeddable_png(&self, path: &Path) -> Result<EmbeddedImage, BackendError>;
}
