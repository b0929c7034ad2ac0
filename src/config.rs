//! File filtering configuration.
//!
//! This module provides support for loading and applying file filtering
//! rules via TOML configuration files. It supports:
//! - Overriding the allowed video extensions
//! - Exact filename exclusion
//! - Glob pattern exclusion
//! - Regex pattern exclusion
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format with the following structure:
//!
//! ```toml
//! [filters]
//! extensions = ["mp4", "mkv", "avi", "webm"]
//!
//! [filters.exclude]
//! filenames = ["sample.mkv"]
//! patterns = ["*.trailer.*"]
//! regex = []
//! ```
//!
//! The file is looked up at an explicit path if one is given, otherwise at
//! `.showrename.toml` inside the target directory; if neither exists the
//! built-in defaults apply.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Video extensions accepted by default, without the leading dot.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];

/// Name of the per-directory configuration file.
pub const CONFIG_FILE_NAME: &str = ".showrename.toml";

/// Errors that can occur during configuration loading and filtering.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the explicitly requested path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for file filtering rules.
///
/// Deserialized from TOML configuration files; controls which directory
/// entries are considered for renaming at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: FilterRules,
}

/// Root-level filter rules configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRules {
    /// Allowed extensions (without dot). Empty means the built-in default
    /// list (`mp4`, `mkv`, `avi`).
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Rules for excluding files.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Rules for excluding files from renaming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., "sample.mkv").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.trailer.*").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns to exclude (for advanced users).
    #[serde(default)]
    pub regex: Vec<String>,
}

impl FilterConfig {
    /// Loads configuration for a target directory.
    ///
    /// An explicit `config_path` must exist; without one, the per-directory
    /// `.showrename.toml` is used if present, otherwise the defaults.
    pub fn load(dir: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => {
                let default_path = dir.join(CONFIG_FILE_NAME);
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents =
            fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compiles the filter rules into a form ready for matching.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex patterns are invalid.
    pub fn compile(&self) -> Result<CompiledFilters, ConfigError> {
        let extensions: HashSet<String> = if self.filters.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.filters
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        };

        let exclude_filenames: HashSet<String> =
            self.filters.exclude.filenames.iter().cloned().collect();

        let exclude_globs = self
            .filters
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = self
            .filters
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledFilters {
            extensions,
            exclude_filenames,
            exclude_globs,
            exclude_regexes,
        })
    }
}

/// Pre-compiled filter rules for efficient matching.
#[derive(Debug)]
pub struct CompiledFilters {
    extensions: HashSet<String>,
    exclude_filenames: HashSet<String>,
    exclude_globs: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledFilters {
    /// Decides whether a filename should be considered for renaming.
    ///
    /// Evaluation order:
    /// 1. Exact filename exclusion - if listed, exclude
    /// 2. Glob pattern match - if matched, exclude
    /// 3. Regex pattern match - if matched, exclude
    /// 4. Extension check (skipped in force mode) - if not allowed, exclude
    pub fn should_include(&self, filename: &str, all_extensions: bool) -> bool {
        if self.exclude_filenames.contains(filename) {
            return false;
        }

        if self.exclude_globs.iter().any(|g| g.matches(filename)) {
            return false;
        }

        if self.exclude_regexes.iter().any(|r| r.is_match(filename)) {
            return false;
        }

        if all_extensions {
            return true;
        }

        self.has_allowed_extension(filename)
    }

    /// Case-insensitive check of the filename extension against the
    /// allowed list.
    fn has_allowed_extension(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_default() -> CompiledFilters {
        FilterConfig::default()
            .compile()
            .expect("default config should compile")
    }

    #[test]
    fn test_default_extensions() {
        let filters = compile_default();
        assert!(filters.should_include("a.mp4", false));
        assert!(filters.should_include("a.MKV", false));
        assert!(filters.should_include("a.avi", false));
        assert!(!filters.should_include("a.srt", false));
        assert!(!filters.should_include("noext", false));
    }

    #[test]
    fn test_force_mode_skips_extension_check() {
        let filters = compile_default();
        assert!(filters.should_include("a.srt", true));
        assert!(filters.should_include("noext", true));
    }

    #[test]
    fn test_extension_override() {
        let config: FilterConfig = toml::from_str(
            r#"
            [filters]
            extensions = ["webm", ".MP4"]
            "#,
        )
        .expect("valid toml");
        let filters = config.compile().expect("should compile");

        assert!(filters.should_include("a.webm", false));
        assert!(filters.should_include("a.mp4", false));
        // Override replaces the default list rather than extending it.
        assert!(!filters.should_include("a.mkv", false));
    }

    #[test]
    fn test_exclude_rules() {
        let config: FilterConfig = toml::from_str(
            r#"
            [filters.exclude]
            filenames = ["sample.mkv"]
            patterns = ["*.trailer.*"]
            regex = ["(?i)ncop"]
            "#,
        )
        .expect("valid toml");
        let filters = config.compile().expect("should compile");

        assert!(!filters.should_include("sample.mkv", false));
        assert!(!filters.should_include("show.trailer.mkv", false));
        assert!(!filters.should_include("Show NCOP1.mkv", false));
        // Excludes apply even in force mode.
        assert!(!filters.should_include("sample.mkv", true));
        assert!(filters.should_include("show 01.mkv", false));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let config: FilterConfig = toml::from_str(
            r#"
            [filters.exclude]
            regex = ["["]
            "#,
        )
        .expect("valid toml");

        assert!(matches!(
            config.compile(),
            Err(ConfigError::InvalidRegexPattern { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = FilterConfig::load(
            Path::new("."),
            Some(Path::new("/definitely/not/here.toml")),
        );
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_from_directory_file() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[filters]\nextensions = [\"webm\"]\n",
        )
        .expect("write config");

        let config = FilterConfig::load(temp.path(), None).expect("load");
        assert_eq!(config.filters.extensions, vec!["webm".to_string()]);
    }

    #[test]
    fn test_absent_directory_config_uses_defaults() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let config = FilterConfig::load(temp.path(), None).expect("defaults");
        assert!(config.filters.extensions.is_empty());
    }
}
