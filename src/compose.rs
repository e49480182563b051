//! Page composer: ordered images in, one `.docx` out.
//!
//! ## Run lifecycle
//!
//! ```text
//! Idle ──scan──▶ Running(0/N) ──▶ Running(1/N) ──▶ … ──▶ Running(N/N) ──save──▶ Done(path)
//!                     │                                        │
//!                     └──────────── any error ─────────────────┴──▶ Failed(reason)
//! ```
//!
//! - Progress is reported as 0 when the pages start, then
//!   `(i + 1) * (100 / N)` after page `i`, then reset to 0 when the run ends
//!   (successfully or not). An empty directory reports only the initial 0.
//! - One unreadable image fails the whole run. There is no skip-and-continue.
//! - The document is written exactly once, after every page has been placed
//!   and rendered. A failed run leaves no output file behind.
//! - The output file name is fixed by config and lives in the input
//!   directory. An existing file is replaced unless `output.overwrite` is off.

use crate::config::{ComposeConfig, PageConfig};
use crate::document::{self, DocumentError, PageDocument};
use crate::imaging::{BackendError, ImageBackend, fit_to_page};
use crate::scan::{self, ScanError};
use crate::types::{ImageEntry, ProgressSink};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("Cannot place {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Image has zero width or height: {0}")]
    EmptyImage(PathBuf),
    #[error("Cannot write document: {0}")]
    Document(#[from] DocumentError),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub pages: usize,
    /// Pages whose fitted size still exceeds the usable area (axis fit only).
    pub overflowing: Vec<PathBuf>,
}

/// Pages laid out by [`compose`].
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub document: PageDocument,
    /// Images whose fitted size exceeds the usable area, in page order.
    pub overflowing: Vec<PathBuf>,
}

/// Where the document for `dir` is written.
pub fn output_path(dir: &Path, config: &ComposeConfig) -> PathBuf {
    dir.join(&config.output.filename)
}

/// Lay out `entries` in order, one picture each.
///
/// Reports 0 before the first page and `(i + 1) * (100 / N)` after each one.
pub fn compose(
    entries: &[ImageEntry],
    page: &PageConfig,
    backend: &impl ImageBackend,
    progress: &mut impl ProgressSink,
) -> Result<Composition, ComposeError> {
    let geometry = page.geometry();
    let mut doc = PageDocument::new(geometry);
    let mut overflowing = Vec::new();

    let total = entries.len();
    let step = if total > 0 { 100.0 / total as f64 } else { 0.0 };
    progress.report(0.0);

    for (idx, entry) in entries.iter().enumerate() {
        let dims = backend
            .identify(&entry.path)
            .map_err(|source| ComposeError::Image {
                path: entry.path.clone(),
                source,
            })?;
        let fit = fit_to_page(dims.width, dims.height, &geometry, page.fit)
            .ok_or_else(|| ComposeError::EmptyImage(entry.path.clone()))?;

        if fit.overflows(&geometry) {
            warn!(
                path = %entry.path.display(),
                width_in = fit.width_inches,
                height_in = fit.height_inches,
                "image exceeds the usable page area"
            );
            overflowing.push(entry.path.clone());
        }
        debug!(
            path = %entry.path.display(),
            width = dims.width,
            height = dims.height,
            width_in = fit.width_inches,
            height_in = fit.height_inches,
            "placed page {}/{}",
            idx + 1,
            total
        );

        doc.insert_image(&entry.path, fit.width_inches, fit.height_inches);
        progress.report((idx + 1) as f64 * step);
    }

    Ok(Composition {
        document: doc,
        overflowing,
    })
}

/// Full run over one directory: scan, order, compose, save.
pub fn convert_directory(
    dir: &Path,
    config: &ComposeConfig,
    backend: &impl ImageBackend,
    progress: &mut impl ProgressSink,
) -> Result<ConversionReport, ComposeError> {
    let result = run(dir, config, backend, progress);
    match &result {
        Ok(report) if report.pages == 0 => {}
        _ => progress.report(0.0),
    }
    result
}

fn run(
    dir: &Path,
    config: &ComposeConfig,
    backend: &impl ImageBackend,
    progress: &mut impl ProgressSink,
) -> Result<ConversionReport, ComposeError> {
    let target = output_path(dir, config);
    if !config.output.overwrite && target.exists() {
        return Err(DocumentError::AlreadyExists(target).into());
    }

    let entries = scan::scan(dir, &config.input.extension, backend)?;
    info!(dir = %dir.display(), images = entries.len(), "composing document");

    let Composition {
        document: doc,
        overflowing,
    } = compose(&entries, &config.page, backend, progress)?;

    document::save(&doc, backend, &target, config.output.overwrite)?;
    info!(path = %target.display(), pages = doc.len(), "document saved");

    Ok(ConversionReport {
        output_path: target,
        pages: doc.len(),
        overflowing,
    })
}
