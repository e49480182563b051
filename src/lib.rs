//! # img2docx
//!
//! Binds a folder of images into a single Word document: one picture per
//! page, scaled to fit the page, ordered by when each photo was taken.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      folder/   →  Vec<ImageEntry>   (matching files + EXIF capture time, ordered)
//! 2. Compose   entries   →  PageDocument      (page-fit size per image, progress per page)
//! 3. Save      document  →  folder/png_image_document.docx   (rendered in memory, renamed into place)
//! ```
//!
//! The pipeline is single-threaded and synchronous. Progress is pushed into
//! a caller-supplied [`types::ProgressSink`]; the library never talks to a
//! terminal or window directly.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists matching files in one directory and orders them by capture time |
//! | [`metadata`] | Best-effort EXIF `DateTimeOriginal` extraction |
//! | [`compose`] | Page composer: fits each image, drives progress, runs the whole conversion |
//! | [`document`] | Append-only page list, DOCX rendering, atomic save |
//! | [`imaging`] | Backend trait, `image`-crate backend, pure page-fit math |
//! | [`config`] | Layered `img2docx.toml` loading and validation |
//! | [`types`] | `ImageEntry`, `CaptureTimestamp`, progress types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Capture Time Is a String
//!
//! EXIF stores `DateTimeOriginal` as `YYYY:MM:DD HH:MM:SS`, which already
//! sorts lexically in time order. Keeping the raw text means malformed
//! values still produce a deterministic order instead of an error, and files
//! without the tag sort first, tied with each other in directory order.
//!
//! ## One-Axis Page Fit by Default
//!
//! The default [`imaging::FitMode::Axis`] clamps only the long side of an
//! image and derives the other from the aspect ratio. Near-square portraits
//! can therefore come out wider than the page. This is the established
//! output size for existing documents, so the stricter
//! [`imaging::FitMode::Contain`] is opt-in.
//!
//! ## All-or-Nothing Output
//!
//! A single unreadable image aborts the run. Because the document is
//! rendered fully in memory and persisted through a temp-file rename, a
//! failed run never leaves a partial `.docx` next to the images.

pub mod compose;
pub mod config;
pub mod document;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
