//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! lines, the rename-plan table, the execution summary, and progress
//! tracking for the rename loop.

use crate::executor::RenameReport;
use crate::plan::RenamePlan;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Display width of the original-filename column in the plan table.
const ORIGINAL_NAME_WIDTH: usize = 70;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints the rename plan as a two-column table.
    ///
    /// The original filename column is truncated to a fixed width so long
    /// release names don't wreck the layout; the destination column shows
    /// the subfolder when one applies.
    pub fn plan_table(plan: &RenamePlan) {
        Self::header("Rename Plan:");
        println!(
            "{:<width$} -> {}",
            "Original Filename".bold(),
            "New Filename".bold(),
            width = ORIGINAL_NAME_WIDTH
        );
        println!("{}", "-".repeat(ORIGINAL_NAME_WIDTH + 10));

        for entry in &plan.entries {
            println!(
                "{:<width$} -> {}",
                truncate_name(&entry.original_name, ORIGINAL_NAME_WIDTH),
                entry.relative_destination(),
                width = ORIGINAL_NAME_WIDTH
            );
        }
    }

    /// Prints the execution summary with success and failure counts.
    pub fn summary(report: &RenameReport) {
        Self::header("Renaming complete!");
        println!(
            "  {} of {} files successfully renamed ({} regular, {} special).",
            report.renamed.to_string().green(),
            report.total_processed(),
            report.regular,
            report.specials
        );

        if !report.failures.is_empty() {
            println!("  Failed: {}", report.failures.len().to_string().red());
            for (name, reason) in &report.failures {
                eprintln!("    - {}: {}", name, reason);
            }
        }
    }

    /// Creates and returns a progress bar for the rename loop.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }
}

/// Truncates a filename for display, replacing the tail with "..." when it
/// exceeds `width` characters. Works on characters, not bytes, so multibyte
/// names are never split mid-character.
fn truncate_name(name: &str, width: usize) -> String {
    let count = name.chars().count();
    if count <= width {
        return name.to_string();
    }
    let truncated: String = name.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", truncated)
}
