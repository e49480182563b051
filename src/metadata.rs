//! Capture-time extraction from embedded EXIF.
//!
//! The only metadata field this tool cares about is EXIF `DateTimeOriginal`
//! (tag `0x9003`, decimal 36867), used purely as a sort key. Most exported
//! or screenshotted PNGs carry no EXIF at all, so every failure mode here
//! (unreadable file, no EXIF block, corrupt IFD, missing tag, wrong type)
//! is an ordinary outcome and collapses to `None`.
//!
//! Containers are sniffed by content, not by extension, via
//! `exif::Reader::read_from_container`: PNG `eXIf` chunks, JPEG APP1,
//! TIFF, WebP and HEIF are all recognised.

use crate::types::CaptureTimestamp;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Best-effort read of an image's original capture time. Never fails.
pub fn try_get_capture_timestamp(path: &Path) -> Option<CaptureTimestamp> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot open image for EXIF");
            return None;
        }
    };

    let exif = match Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => exif,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable EXIF");
            return None;
        }
    };

    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let timestamp = ascii_value(&field.value);
    if timestamp.is_none() {
        debug!(path = %path.display(), "DateTimeOriginal is not ASCII");
    }
    timestamp
}

/// First string of an ASCII field, with trailing NULs removed.
fn ascii_value(value: &Value) -> Option<CaptureTimestamp> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    let bytes = parts.first()?;
    let text = String::from_utf8_lossy(bytes);
    Some(CaptureTimestamp::new(text.trim_end_matches('\0')))
}
