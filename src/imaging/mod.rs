//! Image handling in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Capture time** | `kamadak-exif` (`DateTimeOriginal`) |
//! | **Embed** | PNG pass-through, other formats re-encoded to PNG |
//! | **Page fit** | [`fit_to_page`] |
//!
//! The module is split into:
//! - **Calculations**: pure page-fit math (unit testable)
//! - **Parameters**: page geometry and fit policy
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, EmbeddedImage, ImageBackend};
pub use calculations::{PageFit, fit_to_page};
pub use params::{FitMode, PageGeometry};
pub use rust_backend::{RustBackend, is_readable_extension};
