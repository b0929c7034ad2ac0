//! Command-line interface module for showrename.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Classification of scanned filenames
//! - Plan display and collision warnings
//! - Confirmation prompting
//! - Execution orchestration with per-entry reporting

use crate::classifier::Classifier;
use crate::config::FilterConfig;
use crate::executor::{PlanExecutor, RenameReport};
use crate::output::OutputFormatter;
use crate::plan::{ClassifiedFile, RenamePlan, build_plan};
use crate::scanner::{ScanOptions, scan_directory};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Rename TV show episode files into a consistent scheme.
///
/// Scans a directory of video files, infers episode numbers (and
/// special/bonus status) from the filenames, shows the resulting rename
/// plan, and executes it after confirmation. Specials are moved into a
/// `Specials` subfolder.
#[derive(Debug, Parser)]
#[command(name = "showrename", version, about)]
pub struct Args {
    /// Name of the show, used as the prefix of every new filename.
    #[arg(short = 'n', long = "show-name")]
    pub show_name: String,

    /// Directory containing the episode files.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Process all regular files regardless of extension.
    #[arg(short, long)]
    pub force: bool,

    /// Show the rename plan without prompting or renaming anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt and rename immediately.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Path to a filter configuration file (default: <dir>/.showrename.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs the CLI application with the given arguments.
///
/// This is the main entry point for CLI operations: it scans the target
/// directory, classifies every filename, builds the rename plan, displays
/// it, and - unless in dry-run mode - asks for confirmation and executes.
///
/// Classification failures are per-file warnings; an empty show name, an
/// unreadable directory, or zero classifiable files abort the run before
/// any filesystem mutation.
pub fn run_cli(args: &Args) -> Result<(), String> {
    let show_name = args.show_name.trim();
    if show_name.is_empty() {
        return Err("Show name must not be empty".to_string());
    }

    let config = FilterConfig::load(&args.directory, args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    OutputFormatter::info(&format!(
        "Scanning {} for episode files...",
        args.directory.display()
    ));

    let options = ScanOptions {
        all_extensions: args.force,
    };
    let filenames =
        scan_directory(&args.directory, &filters, options).map_err(|e| e.to_string())?;

    let plan = classify_and_plan(&filenames, show_name);
    if plan.is_empty() {
        return Err("No suitable video files found in the directory.".to_string());
    }

    OutputFormatter::plan_table(&plan);

    for destination in plan.collisions() {
        OutputFormatter::warning(&format!(
            "Multiple files resolve to '{}'; only the first rename will succeed.",
            destination
        ));
    }

    if args.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "{} files would be renamed ({} regular, {} special). No files were modified.",
            plan.len(),
            plan.regular_count(),
            plan.special_count()
        ));
        return Ok(());
    }

    if !args.yes && !confirm_rename()? {
        OutputFormatter::plain("Operation cancelled.");
        return Ok(());
    }

    let report = execute_with_progress(args, &plan)?;
    OutputFormatter::summary(&report);

    Ok(())
}

/// Classifies the scanned filenames and builds the rename plan.
///
/// Files without an extractable episode number are reported as warnings
/// and excluded; they never reach the plan.
fn classify_and_plan(filenames: &[String], show_name: &str) -> RenamePlan {
    let classifier = Classifier::new();
    let mut classified: Vec<ClassifiedFile> = Vec::new();

    for filename in filenames {
        let result = classifier.classify(filename);
        match result.episode {
            Some(episode_number) => classified.push(ClassifiedFile {
                original_name: filename.clone(),
                episode_number,
                is_special: result.is_special,
            }),
            None => {
                OutputFormatter::warning(&format!(
                    "Could not find an episode number in '{}'; skipping.",
                    filename
                ));
            }
        }
    }

    build_plan(&classified, show_name)
}

/// Asks the user to confirm the displayed plan.
///
/// Accepts "y" or "yes" case-insensitively; anything else (including EOF)
/// cancels.
fn confirm_rename() -> Result<bool, String> {
    print!("\nContinue with renaming? (yes/no): ");
    io::stdout()
        .flush()
        .map_err(|e| format!("Error writing prompt: {}", e))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| format!("Error reading confirmation: {}", e))?;

    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Runs the rename loop with a progress bar, one entry at a time.
fn execute_with_progress(args: &Args, plan: &RenamePlan) -> Result<RenameReport, String> {
    let progress = OutputFormatter::create_progress_bar(plan.len() as u64);
    let mut report = RenameReport::default();

    for entry in &plan.entries {
        match PlanExecutor::rename_entry(&args.directory, entry) {
            Ok(_) => {
                progress.println(format!(
                    "✓ {} -> {}",
                    entry.original_name,
                    entry.relative_destination()
                ));
                report.record_success(entry);
            }
            Err(e) => {
                progress.println(format!("✗ {}: {}", entry.original_name, e));
                report.record_failure(entry, e.to_string());
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(report)
}
