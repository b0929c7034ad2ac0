//! showrename - a TV show episode renaming utility
//!
//! This library provides utilities for extracting episode numbers and
//! special/bonus markers from video filenames, building a deterministic
//! rename plan (regular episodes first, ascending by number, then
//! specials), and executing that plan with per-entry error reporting.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod executor;
pub mod output;
pub mod plan;
pub mod scanner;

pub use classifier::{Classification, Classifier};
pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use executor::{PlanExecutor, RenameError, RenameReport};
pub use plan::{ClassifiedFile, PlanEntry, RenamePlan, build_plan};
pub use scanner::{ScanError, ScanOptions, scan_directory};

pub use cli::{Args, run_cli};
