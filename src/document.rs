//! Paginated output document.
//!
//! [`PageDocument`] is the in-memory, append-only list of placed images built
//! by the composer. Nothing touches the filesystem until [`save`], which
//! renders the whole document to memory with `docx-rs` and then swaps it into
//! place in one rename. A run that fails halfway therefore never leaves a
//! truncated `.docx` behind.
//!
//! ## Layout
//!
//! The section's page size is the usable area plus a 0.25 in margin on every
//! side, so the default 8.0 × 10.5 in area lands on US Letter. Each image is
//! its own paragraph holding one inline picture at the fitted size; a page
//! break happens wherever Word decides the next picture no longer fits.

use crate::imaging::{BackendError, ImageBackend, PageGeometry};
use docx_rs::{Docx, PageMargin, Paragraph, Pic, Run};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// English Metric Units per inch (OOXML drawing unit).
pub const EMU_PER_INCH: f64 = 914_400.0;
/// Twentieths of a point per inch (OOXML page-setup unit).
pub const TWIPS_PER_INCH: f64 = 1_440.0;
/// Margin added around the usable area on every side.
pub const MARGIN_INCHES: f64 = 0.25;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] BackendError),
    #[error("Failed to pack document: {0}")]
    Pack(String),
    #[error("Refusing to overwrite existing file: {0}")]
    AlreadyExists(PathBuf),
}

/// One image placed on the page at its display size.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub path: PathBuf,
    pub width_inches: f64,
    pub height_inches: f64,
}

/// Ordered, append-only sequence of placed images.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    geometry: PageGeometry,
    pages: Vec<PlacedImage>,
}

impl PageDocument {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
        }
    }

    /// Append one image sized `width × height` inches.
    pub fn insert_image(&mut self, path: impl Into<PathBuf>, width_inches: f64, height_inches: f64) {
        self.pages.push(PlacedImage {
            path: path.into(),
            width_inches,
            height_inches,
        });
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[PlacedImage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Inches to EMU, truncated like most OOXML writers do.
pub fn inches_to_emu(inches: f64) -> u32 {
    (inches * EMU_PER_INCH) as u32
}

fn inches_to_twips(inches: f64) -> u32 {
    (inches * TWIPS_PER_INCH).round() as u32
}

/// Render the document to `.docx` bytes.
///
/// Every image is read again here through `backend`, so a file that turned
/// unreadable since it was measured still fails the render.
pub fn render_docx(
    doc: &PageDocument,
    backend: &impl ImageBackend,
) -> Result<Vec<u8>, DocumentError> {
    let geometry = doc.geometry();
    let margin = (MARGIN_INCHES * TWIPS_PER_INCH).round() as i32;

    let mut docx = Docx::new()
        .page_size(
            inches_to_twips(geometry.width_inches + 2.0 * MARGIN_INCHES),
            inches_to_twips(geometry.height_inches + 2.0 * MARGIN_INCHES),
        )
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        );

    for page in doc.pages() {
        let embedded = backend.embeddable_png(&page.path)?;
        let pic = Pic::new_with_dimensions(
            embedded.png,
            embedded.dimensions.width,
            embedded.dimensions.height,
        )
        .size(
            inches_to_emu(page.width_inches),
            inches_to_emu(page.height_inches),
        );
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)));
        debug!(
            path = %page.path.display(),
            width_in = page.width_inches,
            height_in = page.height_inches,
            "embedded image"
        );
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| DocumentError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Atomically write `bytes` to `target`.
///
/// The data goes to a temp file in the same directory first and is renamed
/// over `target` only once fully written. With `overwrite = false` an
/// existing `target` is left untouched and
/// [`DocumentError::AlreadyExists`] is returned.
pub fn persist(bytes: &[u8], target: &Path, overwrite: bool) -> Result<(), DocumentError> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if overwrite {
        tmp.persist(target).map_err(|e| DocumentError::Io(e.error))?;
    } else {
        tmp.persist_noclobber(target).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                DocumentError::AlreadyExists(target.to_path_buf())
            } else {
                DocumentError::Io(e.error)
            }
        })?;
    }
    Ok(())
}

/// Render and persist in one go.
pub fn save(
    doc: &PageDocument,
    backend: &impl ImageBackend,
    target: &Path,
    overwrite: bool,
) -> Result<(), DocumentError> {
    let bytes = render_docx(doc, backend)?;
    persist(&bytes, target, overwrite)
}
