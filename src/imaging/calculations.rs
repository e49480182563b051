//! Pure page-fit math.
//!
//! No I/O here; everything is testable with bare numbers.

use super::params::{FitMode, PageGeometry};

/// Display size of one image on its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFit {
    pub width_px: f64,
    pub height_px: f64,
    pub width_inches: f64,
    pub height_inches: f64,
}

impl PageFit {
    /// Whether the fitted size exceeds the usable page area on either axis.
    pub fn overflows(&self, geometry: &PageGeometry) -> bool {
        self.width_px > geometry.max_width_px() || self.height_px > geometry.max_height_px()
    }
}

/// Scale an image of `width × height` pixels onto the page.
///
/// With [`FitMode::Axis`]:
///
/// - wider than tall: `w' = min(max_w, w)`, `h' = w' / (w / h)`
/// - otherwise:       `h' = min(max_h, h)`, `w' = h' * (w / h)`
///
/// Images smaller than the page are never enlarged. Returns `None` for a
/// zero-sized image, which has no aspect ratio.
///
/// # Examples
/// ```
/// # use img2docx::imaging::{fit_to_page, FitMode, PageGeometry};
/// let fit = fit_to_page(1600, 800, &PageGeometry::default(), FitMode::Axis).unwrap();
/// assert_eq!((fit.width_px, fit.height_px), (768.0, 384.0));
/// ```
pub fn fit_to_page(
    width: u32,
    height: u32,
    geometry: &PageGeometry,
    mode: FitMode,
) -> Option<PageFit> {
    if width == 0 || height == 0 {
        return None;
    }

    let (w, h) = (width as f64, height as f64);
    let aspect = w / h;
    let (max_w, max_h) = (geometry.max_width_px(), geometry.max_height_px());

    let (mut new_w, mut new_h) = if width > height {
        let new_w = max_w.min(w);
        (new_w, new_w / aspect)
    } else {
        let new_h = max_h.min(h);
        (new_h * aspect, new_h)
    };

    if mode == FitMode::Contain {
        if new_w > max_w {
            new_w = max_w;
            new_h = new_w / aspect;
        }
        if new_h > max_h {
            new_h = max_h;
            new_w = new_h * aspect;
        }
    }

    Some(PageFit {
        width_px: new_w,
        height_px: new_h,
        width_inches: geometry.px_to_inches(new_w),
        height_inches: geometry.px_to_inches(new_h),
    })
}
