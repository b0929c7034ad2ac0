//! Rename plan execution.
//!
//! Moves files to their planned destinations inside the scanned directory.
//! Failures are isolated per entry: one rename failing never prevents the
//! remaining entries from being attempted, and every outcome is tallied
//! into a [`RenameReport`].

use crate::plan::{PlanEntry, RenamePlan};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while executing a rename plan.
#[derive(Debug)]
pub enum RenameError {
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a destination subdirectory (e.g., `Specials`).
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The destination already exists and would be overwritten.
    DestinationExists { destination: PathBuf },
    /// The rename syscall itself failed.
    RenameFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for RenameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DestinationExists { destination } => {
                write!(
                    f,
                    "Destination already exists: {}",
                    destination.display()
                )
            }
            Self::RenameFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to rename {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for RenameError {}

/// Result type for rename execution.
pub type RenameResult<T> = Result<T, RenameError>;

/// Tallies of a finished (or partially finished) plan execution.
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Files successfully renamed.
    pub renamed: usize,
    /// Successfully renamed regular episodes.
    pub regular: usize,
    /// Successfully renamed special episodes.
    pub specials: usize,
    /// Per-entry failures as (original filename, reason).
    pub failures: Vec<(String, String)>,
}

impl RenameReport {
    /// Total number of entries processed.
    pub fn total_processed(&self) -> usize {
        self.renamed + self.failures.len()
    }

    /// True if every entry was renamed.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records a successful rename of the given entry.
    pub fn record_success(&mut self, entry: &PlanEntry) {
        self.renamed += 1;
        if entry.is_special {
            self.specials += 1;
        } else {
            self.regular += 1;
        }
    }

    /// Records a failed rename of the given entry.
    pub fn record_failure(&mut self, entry: &PlanEntry, reason: String) {
        self.failures.push((entry.original_name.clone(), reason));
    }
}

/// Executes rename plans against the filesystem.
pub struct PlanExecutor;

impl PlanExecutor {
    /// Renames a single plan entry inside `base_path`.
    ///
    /// Creates the destination subfolder on demand. An existing destination
    /// is refused rather than overwritten, except when the destination is
    /// the source itself (the file already has its final name), which is a
    /// successful no-op.
    ///
    /// Returns the full destination path on success.
    pub fn rename_entry(base_path: &Path, entry: &PlanEntry) -> RenameResult<PathBuf> {
        if !base_path.exists() {
            return Err(RenameError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        let destination_dir = if entry.target_subfolder.is_empty() {
            base_path.to_path_buf()
        } else {
            base_path.join(entry.target_subfolder)
        };

        if !destination_dir.exists() {
            fs::create_dir(&destination_dir).map_err(|e| RenameError::DirectoryCreationFailed {
                path: destination_dir.clone(),
                source: e,
            })?;
        }

        let source_path = base_path.join(&entry.original_name);
        let destination_path = destination_dir.join(&entry.new_name);

        if source_path == destination_path {
            return Ok(destination_path);
        }

        if destination_path.exists() {
            return Err(RenameError::DestinationExists {
                destination: destination_path,
            });
        }

        fs::rename(&source_path, &destination_path).map_err(|e| RenameError::RenameFailed {
            source: source_path,
            destination: destination_path.clone(),
            source_error: e,
        })?;

        Ok(destination_path)
    }

    /// Executes a whole plan, entry by entry.
    ///
    /// Per-entry failures are recorded in the report and do not stop the
    /// remaining entries. Only an invalid base path aborts up front, before
    /// anything has been renamed.
    pub fn execute(base_path: &Path, plan: &RenamePlan) -> RenameResult<RenameReport> {
        if !base_path.exists() {
            return Err(RenameError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        let mut report = RenameReport::default();
        for entry in &plan.entries {
            match Self::rename_entry(base_path, entry) {
                Ok(_) => report.record_success(entry),
                Err(e) => report.record_failure(entry, e.to_string()),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{ClassifiedFile, build_plan};
    use std::fs;
    use tempfile::TempDir;

    fn plan_for(files: &[(&str, u32, bool)]) -> RenamePlan {
        let classified: Vec<ClassifiedFile> = files
            .iter()
            .map(|(name, episode, special)| ClassifiedFile {
                original_name: name.to_string(),
                episode_number: *episode,
                is_special: *special,
            })
            .collect();
        build_plan(&classified, "Show")
    }

    #[test]
    fn test_execute_renames_regular_episode() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Show Ep 1.mkv"), b"x").expect("write");

        let plan = plan_for(&[("Show Ep 1.mkv", 1, false)]);
        let report = PlanExecutor::execute(temp.path(), &plan).expect("execute");

        assert_eq!(report.renamed, 1);
        assert_eq!(report.regular, 1);
        assert!(temp.path().join("Show - 01.mkv").exists());
        assert!(!temp.path().join("Show Ep 1.mkv").exists());
    }

    #[test]
    fn test_execute_routes_special_into_subfolder() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Show SP02.mkv"), b"x").expect("write");

        let plan = plan_for(&[("Show SP02.mkv", 2, true)]);
        let report = PlanExecutor::execute(temp.path(), &plan).expect("execute");

        assert_eq!(report.specials, 1);
        assert!(temp.path().join("Specials").is_dir());
        assert!(
            temp.path()
                .join("Specials")
                .join("Show - 02 - Special.mkv")
                .exists()
        );
    }

    #[test]
    fn test_execute_reuses_existing_specials_dir() {
        let temp = TempDir::new().expect("temp dir");
        fs::create_dir(temp.path().join("Specials")).expect("mkdir");
        fs::write(temp.path().join("Show SP01.mkv"), b"x").expect("write");

        let plan = plan_for(&[("Show SP01.mkv", 1, true)]);
        let report = PlanExecutor::execute(temp.path(), &plan).expect("execute");
        assert!(report.is_complete_success());
    }

    #[test]
    fn test_existing_destination_fails_that_entry_only() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Show Ep 1.mkv"), b"old").expect("write");
        fs::write(temp.path().join("Show - 01.mkv"), b"occupied").expect("write");
        fs::write(temp.path().join("Show Ep 2.mkv"), b"x").expect("write");

        let plan = plan_for(&[("Show Ep 1.mkv", 1, false), ("Show Ep 2.mkv", 2, false)]);
        let report = PlanExecutor::execute(temp.path(), &plan).expect("execute");

        assert_eq!(report.renamed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "Show Ep 1.mkv");
        // The occupied destination was not overwritten.
        assert_eq!(
            fs::read(temp.path().join("Show - 01.mkv")).expect("read"),
            b"occupied"
        );
        assert!(temp.path().join("Show - 02.mkv").exists());
    }

    #[test]
    fn test_already_canonical_name_is_a_noop_success() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Show - 05.mkv"), b"x").expect("write");

        let plan = plan_for(&[("Show - 05.mkv", 5, false)]);
        let report = PlanExecutor::execute(temp.path(), &plan).expect("execute");

        assert_eq!(report.renamed, 1);
        assert!(temp.path().join("Show - 05.mkv").exists());
    }

    #[test]
    fn test_missing_source_is_a_per_entry_failure() {
        let temp = TempDir::new().expect("temp dir");

        let plan = plan_for(&[("ghost 01.mkv", 1, false)]);
        let report = PlanExecutor::execute(temp.path(), &plan).expect("execute");
        assert_eq!(report.renamed, 0);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_invalid_base_path_aborts() {
        let plan = plan_for(&[("a 01.mkv", 1, false)]);
        let result = PlanExecutor::execute(Path::new("/definitely/not/here"), &plan);
        assert!(matches!(result, Err(RenameError::InvalidBasePath { .. })));
    }

    #[test]
    fn test_report_tallies() {
        let mut report = RenameReport::default();
        let plan = plan_for(&[("a 01.mkv", 1, false), ("sp 01.mkv", 1, true)]);
        report.record_success(&plan.entries[0]);
        report.record_failure(&plan.entries[1], "nope".to_string());

        assert_eq!(report.total_processed(), 2);
        assert_eq!(report.regular, 1);
        assert_eq!(report.specials, 0);
        assert!(!report.is_complete_success());
    }
}
