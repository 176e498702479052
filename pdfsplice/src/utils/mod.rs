//! Utilities for path collection and display helpers.

use crate::{Result, error::PdfSpliceError};
use std::path::{Path, PathBuf};

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Returns a flattened list of resolved paths, pattern by pattern. Matches
/// of one pattern come back sorted, which is what `glob` yields.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
/// - A pattern matching nothing is reported as a missing file.
/// - A match that is a directory is rejected.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern)?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let pattern = pattern.as_ref();
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| PdfSpliceError::Other {
        message: format!("Invalid pattern '{pattern}': {err}"),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfSpliceError::Other {
            message: err.to_string(),
        })?;
        check_is_file(&path)?;
        resolved_paths.push(path);
    }

    if resolved_paths.is_empty() {
        return Err(PdfSpliceError::file_not_found(PathBuf::from(pattern)));
    }

    Ok(resolved_paths)
}

/// Ensure `path` exists and is not a directory.
pub fn check_is_file(path: &Path) -> Result<()> {
    if !path.try_exists()? {
        return Err(PdfSpliceError::file_not_found(path.to_path_buf()));
    }

    if path.is_dir() {
        return Err(PdfSpliceError::not_a_file(path.to_path_buf()));
    }

    Ok(())
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
