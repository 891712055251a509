//! Exclusion rules applied to single entry names during a walk.

use regex::Regex;

use super::error::GlobError;

/// Predicate over a single path segment's literal name.
///
/// Two rules apply to every walk: one for directories (filters directory
/// results and prunes descent) and one for files (filters file results).
#[derive(Debug, Clone, Default)]
pub enum ExcludeRule {
    /// Reject nothing.
    #[default]
    Nothing,
    /// Reject names starting with `.`.
    Hidden,
    /// Reject only the `.` and `..` markers.
    Markers,
    /// Reject names matched by a regular expression.
    Pattern(Regex),
}

impl ExcludeRule {
    /// Compile a caller-supplied regular expression into a rule.
    pub fn pattern(source: &str) -> Result<Self, GlobError> {
        Regex::new(source)
            .map(Self::Pattern)
            .map_err(|e| GlobError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// Whether `name` is rejected by this rule.
    pub fn rejects(&self, name: &str) -> bool {
        match self {
            Self::Nothing => false,
            Self::Hidden => name.starts_with('.'),
            Self::Markers => name == "." || name == "..",
            Self::Pattern(re) => re.is_match(name),
        }
    }
}

/// The pair of exclusion rules used by one walk.
#[derive(Debug, Clone)]
pub struct Excludes {
    /// Applied to directory names.
    pub dirs: ExcludeRule,
    /// Applied to file names.
    pub files: ExcludeRule,
}

impl Default for Excludes {
    /// Hidden directories are skipped; every file is kept.
    fn default() -> Self {
        Self {
            dirs: ExcludeRule::Hidden,
            files: ExcludeRule::Nothing,
        }
    }
}

impl Excludes {
    /// Keep everything except the `.`/`..` markers.
    pub const fn everything() -> Self {
        Self {
            dirs: ExcludeRule::Markers,
            files: ExcludeRule::Nothing,
        }
    }

    #[must_use]
    pub fn with_dirs(mut self, rule: ExcludeRule) -> Self {
        self.dirs = rule;
        self
    }

    #[must_use]
    pub fn with_files(mut self, rule: ExcludeRule) -> Self {
        self.files = rule;
        self
    }
}
