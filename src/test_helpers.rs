//! Shared test utilities: fixture image writers and progress recorders.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_png(&tmp.path().join("a.png"), 1600, 800);
//! write_jpeg_with_exif(&tmp.path().join("b.jpg"), 10, 10, "2020:01:01 00:00:00");
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

// =========================================================================
// Fixture images
// =========================================================================

fn solid(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]))
}

/// Write a solid-colour PNG.
pub fn write_png(path: &Path, width: u32, height: u32) {
    solid(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Write a solid-colour JPEG (regardless of `path`'s extension).
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    solid(width, height)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .unwrap();
    buf.into_inner()
}

/// Bare TIFF/EXIF block holding only `DateTimeOriginal`.
pub fn exif_tiff_bytes(timestamp: &str) -> Vec<u8> {
    let field = Field {
        tag: Tag::DateTimeOriginal,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![timestamp.as_bytes().to_vec()]),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

/// Write a TIFF container that carries EXIF but no pixels.
pub fn write_exif_tiff(path: &Path, timestamp: &str) {
    std::fs::write(path, exif_tiff_bytes(timestamp)).unwrap();
}

/// Write a decodable JPEG with an APP1 `Exif` segment right after SOI.
pub fn write_jpeg_with_exif(path: &Path, width: u32, height: u32, timestamp: &str) {
    let jpeg = jpeg_bytes(width, height);
    let tiff = exif_tiff_bytes(timestamp);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let len = u16::try_from(payload.len() + 2).unwrap();

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

// =========================================================================
// Progress
// =========================================================================

/// Sink that keeps every reported value.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub values: Vec<f64>,
}

impl crate::types::ProgressSink for RecordingProgress {
    fn report(&mut self, percent: f64) {
        self.values.push(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn jpeg_with_exif_still_decodes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("x.jpg");
        write_jpeg_with_exif(&path, 12, 6, "2022:02:02 02:02:02");

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (12, 6));
        assert_eq!(
            crate::metadata::try_get_capture_timestamp(&path)
                .unwrap()
                .as_str(),
            "2022:02:02 02:02:02"
        );
    }
}
