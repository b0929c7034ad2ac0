//! Episode number and special-episode detection from filenames.
//!
//! Filenames in the wild encode episode numbers in many competing
//! conventions ("Episode 12", "Ep12", "E12", "- 12", "S2 - 12", "S2 12",
//! "SP12", or just an isolated " 12"). This module evaluates an ordered
//! cascade of patterns, from most explicit to least, and takes the first
//! match. Specials (OVA/Extra/Bonus content) are detected independently of
//! the episode number, so a file can be both a special and carry a number.

use regex::Regex;

/// A single rule in the episode-number cascade.
///
/// Each rule pairs a short name (used in diagnostics and tests) with a
/// pre-compiled pattern whose first capture group is the episode digit run.
struct EpisodeRule {
    name: &'static str,
    pattern: Regex,
}

/// The result of classifying one filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// True if the filename carries a special/bonus-episode marker.
    pub is_special: bool,
    /// The extracted episode number (always >= 1), or `None` if no rule
    /// and no fallback produced one.
    pub episode: Option<u32>,
}

/// Classifies filenames by episode number and special status.
///
/// All patterns are compiled once at construction; classification itself is
/// a pure function of the filename.
pub struct Classifier {
    episode_rules: Vec<EpisodeRule>,
    special_patterns: Vec<Regex>,
}

/// The episode-number cascade, in priority order. First match wins and no
/// further rules are tried. Group 1 is always the digit run.
const EPISODE_PATTERNS: &[(&str, &str)] = &[
    ("episode-word", r"(?i)Episode[ ]*([0-9]{1,3})"),
    ("ep-prefix", r"(?i)Ep[ ]*([0-9]{1,3})"),
    ("e-prefix", r"(?i)E([0-9]{1,3})([^0-9]|$)"),
    ("hyphen", r"-[ ]*([0-9]{1,3})([^0-9]|$)"),
    ("season-hyphen", r"(?i)S[0-9]+[ ]*-[ ]*([0-9]{1,3})"),
    ("season-space", r"(?i)S[0-9]+[ ]+([0-9]{1,3})"),
    ("sp-prefix", r"(?i)SP[ ]*([0-9]{1,3})"),
    ("bare-number", r" ([0-9]{1,2})[^0-9]"),
];

/// Markers that flag a file as special/bonus content, matched
/// case-insensitively anywhere in the filename.
const SPECIAL_PATTERNS: &[&str] = &[
    r"(?i)special",
    r"(?i)SP[0-9]+",
    r"(?i)OVA",
    r"(?i)Extra",
    r"(?i)Bonus",
];

impl Classifier {
    /// Creates a classifier with all patterns pre-compiled.
    pub fn new() -> Self {
        let episode_rules = EPISODE_PATTERNS
            .iter()
            .copied()
            .map(|(name, pattern)| EpisodeRule {
                name,
                pattern: Regex::new(pattern).expect("invalid episode pattern"),
            })
            .collect();

        let special_patterns = SPECIAL_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("invalid special pattern"))
            .collect();

        Self {
            episode_rules,
            special_patterns,
        }
    }

    /// Classifies a single filename.
    ///
    /// Special detection and episode extraction are independent: a special
    /// marker never suppresses number extraction ("SP03" is a special with
    /// episode number 3).
    ///
    /// # Examples
    ///
    /// ```
    /// use showrename::classifier::Classifier;
    ///
    /// let classifier = Classifier::new();
    /// let c = classifier.classify("Show - Episode 7.mkv");
    /// assert_eq!(c.episode, Some(7));
    /// assert!(!c.is_special);
    /// ```
    pub fn classify(&self, filename: &str) -> Classification {
        Classification {
            is_special: self.is_special(filename),
            episode: self.extract_episode_number(filename),
        }
    }

    /// Returns true if any special marker matches the filename.
    pub fn is_special(&self, filename: &str) -> bool {
        self.special_patterns.iter().any(|p| p.is_match(filename))
    }

    /// Extracts the episode number from a filename, or `None` if neither
    /// the rule cascade nor the isolated-two-digit fallback finds one.
    ///
    /// The first matching rule decides: its captured digit run is
    /// zero-padded to two characters when it has exactly one (so "E1" goes
    /// through the same "01" form as an explicit "E01") and parsed. A
    /// captured value of 0 is not a valid episode number and yields `None`
    /// without consulting later rules.
    pub fn extract_episode_number(&self, filename: &str) -> Option<u32> {
        for rule in &self.episode_rules {
            if let Some(captures) = rule.pattern.captures(filename)
                && let Some(digits) = captures.get(1)
            {
                return parse_episode_digits(digits.as_str());
            }
        }

        isolated_two_digit(filename)
    }

    /// Returns the names of the cascade rules, in evaluation order.
    #[allow(dead_code)]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.episode_rules.iter().map(|r| r.name).collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a captured digit run into an episode number.
///
/// A single digit is left-padded with '0' before parsing; the padded form is
/// what downstream equivalence checks on the captured string compare
/// against, even though it does not change the integer value.
fn parse_episode_digits(digits: &str) -> Option<u32> {
    let padded = if digits.len() == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };

    match padded.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

/// Last-resort scan for an isolated run of exactly two digits.
///
/// Walks the filename left to right and returns the first two-digit run
/// that is not adjacent to another digit on either side, so "1080" or a
/// three-digit number never match. Stops at the first candidate; "00"
/// yields `None`.
fn isolated_two_digit(filename: &str) -> Option<u32> {
    let bytes = filename.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i].is_ascii_digit()
            && bytes[i + 1].is_ascii_digit()
            && (i == 0 || !bytes[i - 1].is_ascii_digit())
            && (i + 2 >= bytes.len() || !bytes[i + 2].is_ascii_digit())
        {
            let n = u32::from(bytes[i] - b'0') * 10 + u32::from(bytes[i + 1] - b'0');
            return (n > 0).then_some(n);
        }
    }
    None
}
