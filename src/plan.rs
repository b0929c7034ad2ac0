//! Rename plan construction.
//!
//! Turns classified filenames into an ordered, display-ready rename plan.
//! Name generation is a pure function of the show name, episode number,
//! special flag, and original extension; ordering puts all regular episodes
//! before all specials, ascending by episode number within each group.

use std::collections::HashMap;

/// Subdirectory that special episodes are routed into.
pub const SPECIALS_DIR: &str = "Specials";

/// A filename that was successfully classified.
///
/// Only files with an extracted episode number (>= 1) become records;
/// unclassifiable files never reach the plan builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    /// The filename as found on disk, without any path component.
    pub original_name: String,
    /// The extracted episode number, always >= 1.
    pub episode_number: u32,
    /// True if the filename carried a special/bonus marker.
    pub is_special: bool,
}

/// One entry of the rename plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// The filename as found on disk.
    pub original_name: String,
    /// The generated destination filename.
    pub new_name: String,
    /// Destination subfolder relative to the scanned directory;
    /// empty for regular episodes, [`SPECIALS_DIR`] for specials.
    pub target_subfolder: &'static str,
    /// The episode number this entry was derived from.
    pub episode_number: u32,
    /// True if this entry is a special episode.
    pub is_special: bool,
}

impl PlanEntry {
    /// The destination path relative to the scanned directory,
    /// e.g. `"Show - 01.mkv"` or `"Specials/Show - 01 - Special.mkv"`.
    pub fn relative_destination(&self) -> String {
        if self.target_subfolder.is_empty() {
            self.new_name.clone()
        } else {
            format!("{}/{}", self.target_subfolder, self.new_name)
        }
    }
}

/// An ordered rename plan, ready for display and execution.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    /// Plan entries in execution order: regular episodes ascending by
    /// number, then specials ascending by number.
    pub entries: Vec<PlanEntry>,
}

impl RenamePlan {
    /// Returns true if the plan contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the plan.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of regular (non-special) entries.
    pub fn regular_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_special).count()
    }

    /// Number of special entries.
    pub fn special_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_special).count()
    }

    /// Destinations that more than one entry resolves to.
    ///
    /// Colliding entries are kept in the plan (both are shown to the user);
    /// this method lets the caller warn before execution, where the second
    /// rename would fail rather than overwrite.
    pub fn collisions(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.relative_destination()).or_insert(0) += 1;
        }

        let mut collided: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(destination, _)| destination)
            .collect();
        collided.sort();
        collided
    }
}

/// Builds the rename plan for a set of classified files.
///
/// New names follow `"{show} - {episode:02}{ext}"` for regular episodes and
/// `"{show} - {episode:02} - Special{ext}"` for specials, preserving each
/// file's original extension. The result is sorted with a stable sort on
/// `(is_special, episode_number)`, so ties keep the input order.
///
/// An empty input yields an empty plan; reporting "nothing to do" is the
/// caller's concern.
pub fn build_plan(files: &[ClassifiedFile], show_name: &str) -> RenamePlan {
    let mut entries: Vec<PlanEntry> = files
        .iter()
        .map(|file| {
            let extension = file_extension(&file.original_name);
            let (new_name, target_subfolder) = if file.is_special {
                (
                    format!(
                        "{} - {:02} - Special{}",
                        show_name, file.episode_number, extension
                    ),
                    SPECIALS_DIR,
                )
            } else {
                (
                    format!("{} - {:02}{}", show_name, file.episode_number, extension),
                    "",
                )
            };

            PlanEntry {
                original_name: file.original_name.clone(),
                new_name,
                target_subfolder,
                episode_number: file.episode_number,
                is_special: file.is_special,
            }
        })
        .collect();

    entries.sort_by_key(|entry| (entry.is_special, entry.episode_number));

    RenamePlan { entries }
}

/// Returns the extension of a filename including the leading dot, or an
/// empty string if there is none. A leading dot alone ("`.hidden`") does
/// not count as an extension.
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => "",
        Some(index) => &filename[index..],
    }
}
