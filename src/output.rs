//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! 3 images in page order
//! 001 IMG_0412.png
//!     Captured: (none)
//! 002 IMG_0388.png
//!     Captured: 2021:05:01 09:00:00
//! 003 IMG_0390.png
//!     Captured: 2021:05:01 09:14:52
//! ```
//!
//! ## Convert
//!
//! ```text
//! Document saved as: photos/png_image_document.docx
//!     Pages: 3
//!     Wider or taller than the page:
//!         IMG_0388.png
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::compose::ConversionReport;
use crate::types::ImageEntry;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn format_scan_output(entries: &[ImageEntry]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() * 2 + 1);
    lines.push(match entries.len() {
        0 => "No matching images".to_string(),
        1 => "1 image in page order".to_string(),
        n => format!("{n} images in page order"),
    });
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.file_name()));
        let captured = entry
            .captured
            .as_ref()
            .map_or("(none)", |c| c.as_str());
        lines.push(format!("{}Captured: {}", indent(1), captured));
    }
    lines
}

pub fn print_scan_output(entries: &[ImageEntry]) {
    for line in format_scan_output(entries) {
        println!("{}", line);
    }
}

pub fn format_conversion_report(report: &ConversionReport) -> Vec<String> {
    let mut lines = vec![
        format!("Document saved as: {}", report.output_path.display()),
        format!("{}Pages: {}", indent(1), report.pages),
    ];
    if !report.overflowing.is_empty() {
        lines.push(format!("{}Wider or taller than the page:", indent(1)));
        for path in &report.overflowing {
            lines.push(format!("{}{}", indent(2), display_name(path)));
        }
    }
    lines
}

pub fn print_conversion_report(report: &ConversionReport) {
    for line in format_conversion_report(report) {
        println!("{}", line);
    }
}
