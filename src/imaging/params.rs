//! Page geometry and fit policy.
//!
//! These types describe *where* an image has to fit, not how it gets there.
//! [`calculations`](super::calculations) turns them plus an image's native
//! size into a [`PageFit`](super::calculations::PageFit).
//!
//! ## Types
//!
//! - [`PageGeometry`]: usable page area in inches plus the assumed pixel density.
//! - [`FitMode`]: which axes are clamped against the page.

use serde::{Deserialize, Serialize};

/// Usable page area and the density used to convert pixels to inches.
///
/// Defaults are US Letter minus a margin (8.0 × 10.5 in) at 96 px/in,
/// i.e. a 768 × 1008 px box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: f64,
}

impl PageGeometry {
    pub fn max_width_px(&self) -> f64 {
        self.width_inches * self.dpi
    }

    pub fn max_height_px(&self) -> f64 {
        self.height_inches * self.dpi
    }

    pub fn px_to_inches(&self, px: f64) -> f64 {
        px / self.dpi
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_inches: 8.0,
            height_inches: 10.5,
            dpi: 96.0,
        }
    }
}

/// How an image is clamped to the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Clamp only the long axis (width if wider than tall, else height) and
    /// derive the other from the aspect ratio. The derived side is not
    /// checked, so extreme panoramas can still overflow the page.
    #[default]
    Axis,
    /// Clamp the long axis as above, then shrink both sides further if the
    /// derived side still exceeds its own limit.
    Contain,
}
