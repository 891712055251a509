//! Mask compilation into a walk plan.

use regex::{Regex, RegexBuilder};

use super::error::GlobError;
use crate::paths::{directory_of, static_prefix, wildcards};

/// Everything a walk needs to know about a mask.
#[derive(Debug, Clone)]
pub struct WalkPlan {
    /// Wildcard-free directory the walk starts from (`""` = current dir).
    pub base: String,
    /// Whether the mask contains `**` and the walk must descend.
    pub recursive: bool,
    /// Full-path matcher for candidate entries.
    pub pattern: Regex,
}

impl WalkPlan {
    /// Compile an already-normalized mask.
    pub fn compile(mask: &str, case_insensitive: bool) -> Result<Self, GlobError> {
        let base = directory_of(static_prefix(mask));
        let source = wildcards(mask);
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| GlobError::InvalidPattern {
                pattern: mask.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            base,
            recursive: mask.contains("**"),
            pattern,
        })
    }

    /// Directory string to hand to the listing primitive.
    pub fn listing_dir(&self) -> &str {
        if self.base.is_empty() { "." } else { &self.base }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}
