//! Directory scanning and file filtering.
//!
//! Enumerates regular files in a single target directory (no recursion),
//! applies the compiled filter rules, and returns filenames in
//! lexicographic order so the rest of the pipeline is deterministic
//! regardless of the platform's readdir order.

use crate::config::CompiledFilters;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while scanning a directory.
#[derive(Debug)]
pub enum ScanError {
    /// The target path is not a directory.
    NotADirectory { path: PathBuf },
    /// The directory could not be read.
    DirectoryReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Options controlling the scan, passed explicitly rather than held as
/// ambient state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Process all regular files regardless of extension.
    pub all_extensions: bool,
}

/// Lists the filenames in `dir` that pass the filter rules.
///
/// Subdirectories are skipped (a pre-existing `Specials` folder is
/// therefore never scanned), and only the filename component is returned;
/// the caller re-joins it with the directory when executing the plan.
pub fn scan_directory(
    dir: &Path,
    filters: &CompiledFilters,
    options: ScanOptions,
) -> Result<Vec<String>, ScanError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScanError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| ScanError::DirectoryReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut filenames: Vec<String> = Vec::new();
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if filters.should_include(&name, options.all_extensions) {
                filenames.push(name);
            }
        }
    }

    // Deterministic scan order; this is the tie-break order for the plan.
    filenames.sort();
    Ok(filenames)
}
