//! Ingestion and ordering.
//!
//! Lists the eligible images of one directory and puts them in page order.
//!
//! ## Rules
//!
//! - Only the directory itself is read; subdirectories are ignored.
//! - A file is eligible when its extension equals the configured one,
//!   ignoring case (`IMG_01.PNG` matches `png`). The name is checked before
//!   anything else, so a broken link or unreadable entry with another
//!   extension is skipped, never reported.
//! - Symlinks count as whatever they point to. A matching link that cannot
//!   be resolved fails the scan.
//! - Each file gets a best-effort capture time from its EXIF block.
//! - Entries are ordered by capture time, oldest first. Files without one
//!   come before all timestamped files. Ties (including two missing
//!   timestamps) keep the order the filesystem listed them in.
//!
//! The last rule is the only tiebreak: the sort is stable over the raw
//! directory listing, which is deliberately left unsorted.

use crate::imaging::ImageBackend;
use crate::types::ImageEntry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Whether `path` has the given extension, ignoring ASCII case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// List eligible images in directory-listing order, each with its capture time.
pub fn scan_directory(
    dir: &Path,
    extension: &str,
    backend: &impl ImageBackend,
) -> Result<Vec<ImageEntry>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for item in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let item = match item {
            Ok(item) => item,
            Err(err) if err.path().is_some_and(|p| !has_extension(p, extension)) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
            Err(source) => {
                return Err(ScanError::Walk {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };
        if !has_extension(item.path(), extension) {
            continue;
        }

        let path = item.into_path();
        let is_file = fs::metadata(&path)
            .map_err(|source| ScanError::Stat {
                path: path.clone(),
                source,
            })?
            .is_file();
        if !is_file {
            continue;
        }

        let captured = backend.capture_time(&path);
        debug!(
            path = %path.display(),
            captured = captured.as_ref().map(|c| c.as_str()),
            "found image"
        );
        entries.push(ImageEntry::new(path, captured));
    }
    Ok(entries)
}

/// Stable sort by capture time; missing timestamps first.
pub fn order_entries(mut entries: Vec<ImageEntry>) -> Vec<ImageEntry> {
    entries.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    entries
}

/// [`scan_directory`] followed by [`order_entries`].
pub fn scan(
    dir: &Path,
    extension: &str,
    backend: &impl ImageBackend,
) -> Result<Vec<ImageEntry>, ScanError> {
    let entries = scan_directory(dir, extension, backend)?;
    Ok(order_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::types::CaptureTimestamp;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn entry(name: &str, ts: Option<&str>) -> ImageEntry {
        ImageEntry::new(name, ts.map(CaptureTimestamp::new))
    }

    fn names(entries: &[ImageEntry]) -> Vec<String> {
        entries.iter().map(ImageEntry::file_name).collect()
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    #[test]
    fn has_extension_ignores_case() {
        assert!(has_extension(Path::new("a.png"), "png"));
        assert!(has_extension(Path::new("a.PNG"), "png"));
        assert!(has_extension(Path::new("a.Png"), "PNG"));
        assert!(!has_extension(Path::new("a.png.bak"), "png"));
        assert!(!has_extension(Path::new("png"), "png"));
        assert!(!has_extension(Path::new("a.jpg"), "png"));
    }

    #[test]
    fn scan_picks_only_matching_files() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.png", "B.PNG", "c.Png", "d.jpg", "e.txt", "png", "f.png.old"] {
            touch(tmp.path(), name);
        }

        let entries = scan_directory(tmp.path(), "png", &MockBackend::new()).unwrap();
        let found: HashSet<String> = names(&entries).into_iter().collect();
        let expected: HashSet<String> = ["a.png", "B.PNG", "c.Png"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn scan_does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.png");
        let sub = tmp.path().join("nested.png");
        fs::create_dir(&sub).unwrap();
        touch(&sub, "inner.png");

        let entries = scan_directory(tmp.path(), "png", &MockBackend::new()).unwrap();
        assert_eq!(names(&entries), vec!["top.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_ignores_dangling_link_with_other_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        std::os::unix::fs::symlink("/nonexistent/target", tmp.path().join("notes.txt")).unwrap();

        let entries = scan(tmp.path(), "png", &MockBackend::new()).unwrap();
        assert_eq!(names(&entries), vec!["a.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_ignores_link_back_to_the_directory() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        std::os::unix::fs::symlink(".", tmp.path().join("here")).unwrap();
        std::os::unix::fs::symlink(".", tmp.path().join("loop.png")).unwrap();

        let entries = scan(tmp.path(), "png", &MockBackend::new()).unwrap();
        assert_eq!(names(&entries), vec!["a.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_follows_link_to_matching_file() {
        let tmp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        touch(other.path(), "real.png");
        std::os::unix::fs::symlink(other.path().join("real.png"), tmp.path().join("linked.png"))
            .unwrap();

        let entries = scan(tmp.path(), "png", &MockBackend::new()).unwrap();
        assert_eq!(names(&entries), vec!["linked.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_dangling_matching_link_is_error() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink("/nonexistent/target.png", tmp.path().join("gone.png"))
            .unwrap();

        let result = scan(tmp.path(), "png", &MockBackend::new());
        assert!(matches!(result, Err(ScanError::Stat { .. })));
    }

    #[test]
    fn scan_empty_directory_is_ok() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes.txt");

        let entries = scan(tmp.path(), "png", &MockBackend::new()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn scan_missing_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), "png", &MockBackend::new());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn scan_file_instead_of_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.png");
        let result = scan(&tmp.path().join("a.png"), "png", &MockBackend::new());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn scan_attaches_capture_times() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "late.png");
        touch(tmp.path(), "early.png");
        touch(tmp.path(), "none.png");
        let backend = MockBackend::new()
            .with_timestamp("late.png", "2022:01:01 00:00:00")
            .with_timestamp("early.png", "2020:01:01 00:00:00");

        let entries = scan(tmp.path(), "png", &backend).unwrap();
        assert_eq!(names(&entries), vec!["none.png", "early.png", "late.png"]);
        assert_eq!(entries[0].captured, None);
        assert_eq!(
            entries[1].captured.as_ref().unwrap().as_str(),
            "2020:01:01 00:00:00"
        );
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn order_is_chronological() {
        let ordered = order_entries(vec![
            entry("c", Some("2021:03:01 10:00:00")),
            entry("a", Some("2019:01:01 00:00:00")),
            entry("b", Some("2020:06:15 12:30:00")),
        ]);
        assert_eq!(names(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_timestamps_sort_first() {
        let ordered = order_entries(vec![
            entry("dated", Some("2000:01:01 00:00:00")),
            entry("undated", None),
        ]);
        assert_eq!(names(&ordered), vec!["undated", "dated"]);
    }

    #[test]
    fn ties_keep_listing_order() {
        let ordered = order_entries(vec![
            entry("x3", None),
            entry("t2", Some("2020:01:01 00:00:00")),
            entry("x1", None),
            entry("t1", Some("2020:01:01 00:00:00")),
            entry("x2", None),
        ]);
        assert_eq!(names(&ordered), vec!["x3", "x1", "x2", "t2", "t1"]);
    }

    #[test]
    fn empty_timestamp_ties_with_missing() {
        let ordered = order_entries(vec![
            entry("empty", Some("")),
            entry("missing", None),
            entry("dated", Some("1999:01:01 00:00:00")),
        ]);
        assert_eq!(names(&ordered), vec!["empty", "missing", "dated"]);
    }

    #[test]
    fn ordering_preserves_entry_count() {
        let input: Vec<ImageEntry> = (0..50)
            .map(|i| {
                let ts = (i % 3 != 0).then(|| format!("2020:01:{:02} 00:00:00", 1 + i % 7));
                entry(&format!("{i}"), ts.as_deref())
            })
            .collect();
        let ordered = order_entries(input.clone());
        assert_eq!(ordered.len(), input.len());
        for pair in ordered.windows(2) {
            assert!(pair[0].sort_key() <= pair[1].sort_key());
        }
    }
}
