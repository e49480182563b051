//! Shared types passed between the scan and compose stages.
//!
//! An [`ImageEntry`] is produced by [`scan`](crate::scan), consumed once by
//! [`compose`](crate::compose), and then dropped. Progress flows the other
//! way: compose pushes percentages into whatever [`ProgressSink`] the caller
//! hands it, so the library never holds a reference to the presentation layer.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Raw EXIF capture time, e.g. `"2021:07:14 18:02:33"`.
///
/// Kept as the text stored in the file rather than parsed: the EXIF layout
/// (`YYYY:MM:DD HH:MM:SS`) already orders lexically, and files with odd or
/// truncated values still sort deterministically instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CaptureTimestamp(String);

impl CaptureTimestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaptureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One eligible image file and its (optional) capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<CaptureTimestamp>,
}

impl ImageEntry {
    pub fn new(path: impl Into<PathBuf>, captured: Option<CaptureTimestamp>) -> Self {
        Self {
            path: path.into(),
            captured,
        }
    }

    /// Key used for ordering. Missing timestamps collapse to `""`, so they
    /// sort first and tie with each other (and with empty EXIF values).
    pub fn sort_key(&self) -> &str {
        self.captured.as_ref().map_or("", CaptureTimestamp::as_str)
    }

    /// File name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Receiver for run progress, in percent (0–100).
///
/// Implemented for any `FnMut(f64)`, so tests can pass a closure that
/// records values and the CLI can pass one that drives a progress bar.
pub trait ProgressSink {
    fn report(&mut self, percent: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// Progress value owned by the caller, clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressState {
    value: f64,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl ProgressSink for ProgressState {
    fn report(&mut self, percent: f64) {
        // (i+1) * (100/N) can land a hair above 100 for some N
        self.value = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}
