//! Wildcard matching over a directory tree.
//!
//! A mask such as `src/**.c` is split into a wildcard-free base directory
//! (`src`) and a full-path matcher. The walk lists one directory level at a
//! time through the [`FileSystemPort`] and, for `**` masks, descends into
//! every eligible subdirectory after the current level has been matched, so
//! parents always appear before their descendants.
//!
//! Each level is processed in two separate passes over the same listing:
//!
//! 1. **selection**: entries of the requested kind that survive the kind's
//!    exclude rule and match the mask are appended to the result;
//! 2. **recursion**: subdirectories that are not `.`/`..` and survive the
//!    directory exclude rule are visited.
//!
//! The passes stay separate because a directory exclude prunes descent even
//! in file mode, while a file exclude never does.

mod error;
mod exclude;
mod plan;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

pub use error::GlobError;
pub use exclude::{ExcludeRule, Excludes};
pub use plan::WalkPlan;

use crate::paths::{join, normalize};
use crate::ports::{DirEntry, EntryKind, FileSystemPort};

/// Which entry kind a match selects. The two never mix in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Files,
    Dirs,
}

impl MatchKind {
    const fn selects(self, entry: &DirEntry) -> bool {
        matches!(
            (self, entry.kind),
            (Self::Files, EntryKind::File) | (Self::Dirs, EntryKind::Dir)
        )
    }
}

/// One matched path, with whether the listed entry was a symbolic link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPath {
    pub path: String,
    pub is_symlink: bool,
}

/// Mask matcher backed by a filesystem port.
#[derive(Clone)]
pub struct GlobMatcher {
    fs: Arc<dyn FileSystemPort>,
    case_insensitive: bool,
}

impl GlobMatcher {
    pub fn new(fs: Arc<dyn FileSystemPort>, case_insensitive: bool) -> Self {
        Self {
            fs,
            case_insensitive,
        }
    }

    /// Files matching `mask`, with default excludes.
    pub fn match_files(&self, mask: &str) -> Result<Vec<String>, GlobError> {
        self.match_paths(mask, MatchKind::Files, &Excludes::default())
    }

    /// Directories matching `mask`, with default excludes.
    pub fn match_dirs(&self, mask: &str) -> Result<Vec<String>, GlobError> {
        self.match_paths(mask, MatchKind::Dirs, &Excludes::default())
    }

    /// Match `mask` against the tree under its base directory.
    ///
    /// Returns paths joined from the base directory in discovery order. A
    /// directory that cannot be listed, the base included, contributes no
    /// entries. Only an uncompilable mask is an error.
    pub fn match_paths(
        &self,
        mask: &str,
        kind: MatchKind,
        excludes: &Excludes,
    ) -> Result<Vec<String>, GlobError> {
        let matched = self.match_entries(mask, kind, excludes)?;
        Ok(matched.into_iter().map(|m| m.path).collect())
    }

    /// Like [`match_paths`](Self::match_paths), keeping the symlink flag of
    /// each matched entry.
    pub fn match_entries(
        &self,
        mask: &str,
        kind: MatchKind,
        excludes: &Excludes,
    ) -> Result<Vec<MatchedPath>, GlobError> {
        let mask = normalize(mask);
        let plan = WalkPlan::compile(&mask, self.case_insensitive)?;

        let entries = match self.fs.read_dir(plan.listing_dir()) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(mask = %mask, error = %err, "Base directory not listable; nothing to match");
                return Ok(Vec::new());
            }
        };

        let mut results = Vec::new();
        self.visit(&plan, kind, excludes, &plan.base, &entries, &mut results);
        Ok(results)
    }

    /// Match each mask in turn, keeping the first occurrence of every path.
    pub fn match_all<S: AsRef<str>>(
        &self,
        masks: &[S],
        kind: MatchKind,
        excludes: &Excludes,
    ) -> Result<Vec<String>, GlobError> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for mask in masks {
            for path in self.match_paths(mask.as_ref(), kind, excludes)? {
                if seen.insert(path.clone()) {
                    results.push(path);
                }
            }
        }
        Ok(results)
    }

    fn visit(
        &self,
        plan: &WalkPlan,
        kind: MatchKind,
        excludes: &Excludes,
        dir: &str,
        entries: &[DirEntry],
        results: &mut Vec<MatchedPath>,
    ) {
        // Selection pass.
        for entry in entries {
            if entry.is_marker() || !kind.selects(entry) {
                continue;
            }
            let rule = match entry.kind {
                EntryKind::File => &excludes.files,
                EntryKind::Dir => &excludes.dirs,
            };
            if rule.rejects(&entry.name) {
                continue;
            }
            let candidate = join(dir, &entry.name);
            if plan.matches(&candidate) {
                results.push(MatchedPath {
                    path: candidate,
                    is_symlink: entry.is_symlink,
                });
            }
        }

        if !plan.recursive {
            return;
        }

        // Recursion pass.
        for entry in entries {
            if !entry.is_dir() || entry.is_marker() || excludes.dirs.rejects(&entry.name) {
                continue;
            }
            if entry.is_symlink {
                debug!(dir, name = %entry.name, "Not descending into symlinked directory");
                continue;
            }
            let child = join(dir, &entry.name);
            match self.fs.read_dir(&child) {
                Ok(children) => self.visit(plan, kind, excludes, &child, &children, results),
                Err(err) => debug!(error = %err, "Skipping unreadable directory"),
            }
        }
    }
}

impl std::fmt::Debug for GlobMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobMatcher")
            .field("case_insensitive", &self.case_insensitive)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFs;

    fn matcher(fs: MemoryFs) -> GlobMatcher {
        GlobMatcher::new(Arc::new(fs), false)
    }

    fn source_tree() -> MemoryFs {
        MemoryFs::new()
            .with_file("src/a.c")
            .with_file("src/b.c")
            .with_file("src/sub/c.c")
            .with_file("src/readme.txt")
    }

    #[test]
    fn test_recursive_mask_lists_parents_first() {
        let glob = matcher(source_tree());
        assert_eq!(
            glob.match_files("src/**.c").unwrap(),
            vec!["src/a.c", "src/b.c", "src/sub/c.c"]
        );
    }

    #[test]
    fn test_single_star_stays_at_one_level() {
        let glob = matcher(source_tree());
        assert_eq!(glob.match_files("src/*.c").unwrap(), vec!["src/a.c", "src/b.c"]);
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let glob = matcher(
            MemoryFs::new()
                .with_file("z.c")
                .with_file("a.c")
                .with_file("m.c"),
        );
        assert_eq!(glob.match_files("*.c").unwrap(), vec!["z.c", "a.c", "m.c"]);
    }

    #[test]
    fn test_literal_mask_returns_path_or_nothing() {
        let glob = matcher(source_tree());
        assert_eq!(glob.match_files("src/a.c").unwrap(), vec!["src/a.c"]);
        assert!(glob.match_dirs("src/a.c").unwrap().is_empty());
        assert!(glob.match_files("src/missing.c").unwrap().is_empty());
        assert!(glob.match_files("nowhere/a.c").unwrap().is_empty());
        assert_eq!(glob.match_dirs("src/sub").unwrap(), vec!["src/sub"]);
    }

    #[test]
    fn test_dirs_mode_excludes_files() {
        let glob = matcher(source_tree().with_dir("src/other"));
        assert_eq!(glob.match_dirs("src/*").unwrap(), vec!["src/sub", "src/other"]);
    }

    #[test]
    fn test_hidden_directories_are_pruned_by_default() {
        let glob = matcher(
            MemoryFs::new()
                .with_file("src/a.c")
                .with_file("src/.git/hook.c")
                .with_file("src/.keep.c")
                .with_dir("src/.cache"),
        );
        // Hidden files still match; hidden directories are neither listed nor walked.
        assert_eq!(
            glob.match_files("src/**.c").unwrap(),
            vec!["src/a.c", "src/.keep.c"]
        );
        assert!(glob.match_dirs("src/*").unwrap().is_empty());
    }

    #[test]
    fn test_custom_excludes() {
        let glob = matcher(
            source_tree()
                .with_file("src/build/gen.c")
                .with_file("src/a_test.c"),
        );
        let excludes = Excludes::default()
            .with_dirs(ExcludeRule::pattern("^build$").unwrap())
            .with_files(ExcludeRule::pattern("_test").unwrap());
        let first = glob
            .match_paths("src/**.c", MatchKind::Files, &excludes)
            .unwrap();
        assert_eq!(first, vec!["src/a.c", "src/b.c", "src/sub/c.c"]);

        let second = glob
            .match_paths("src/**.c", MatchKind::Files, &excludes)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recursive_dirs_visit_parent_before_child() {
        let glob = matcher(
            MemoryFs::new()
                .with_dir("a/b/c")
                .with_dir("a/d"),
        );
        assert_eq!(
            glob.match_dirs("a/**").unwrap(),
            vec!["a/b", "a/d", "a/b/c"]
        );
    }

    #[test]
    fn test_double_star_equals_union_of_depths() {
        let glob = matcher(source_tree().with_file("src/sub/deep/d.c"));
        let mut recursive = glob.match_files("src/**.c").unwrap();
        let mut by_depth = Vec::new();
        for mask in ["src/*.c", "src/*/*.c", "src/*/*/*.c"] {
            by_depth.extend(glob.match_files(mask).unwrap());
        }
        recursive.sort();
        by_depth.sort();
        assert_eq!(recursive, by_depth);
    }

    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        let glob = matcher(
            source_tree()
                .with_file("src/locked/secret.c")
                .with_unreadable("src/locked"),
        );
        assert_eq!(
            glob.match_files("src/**.c").unwrap(),
            vec!["src/a.c", "src/b.c", "src/sub/c.c"]
        );
    }

    #[test]
    fn test_unreadable_base_yields_nothing() {
        let glob = matcher(source_tree().with_unreadable("src"));
        assert!(glob.match_files("src/*.c").unwrap().is_empty());
        assert!(glob.match_files("src/**.c").unwrap().is_empty());
    }

    #[test]
    fn test_symlinked_directories_are_matched_not_walked() {
        let glob = matcher(
            MemoryFs::new()
                .with_file("src/a.c")
                .with_symlinked_dir("src/loop")
                .with_file("src/loop/x.c"),
        );
        assert_eq!(glob.match_files("src/**.c").unwrap(), vec!["src/a.c"]);
        assert_eq!(glob.match_dirs("src/*").unwrap(), vec!["src/loop"]);
        assert_eq!(
            glob.match_entries("src/*", MatchKind::Dirs, &Excludes::default())
                .unwrap(),
            vec![MatchedPath {
                path: "src/loop".to_string(),
                is_symlink: true,
            }]
        );
    }

    #[test]
    fn test_current_directory_base_has_no_prefix() {
        let glob = matcher(MemoryFs::new().with_file("main.c").with_file("lib/x.c"));
        assert_eq!(glob.match_files("**.c").unwrap(), vec!["main.c", "lib/x.c"]);
        assert_eq!(glob.match_files("./*.c").unwrap(), vec!["main.c"]);
    }

    #[test]
    fn test_absolute_masks() {
        let glob = matcher(MemoryFs::new().with_file("/usr/lib/libz.so"));
        assert_eq!(
            glob.match_files("/usr/lib/*.so").unwrap(),
            vec!["/usr/lib/libz.so"]
        );
    }

    #[test]
    fn test_match_all_deduplicates() {
        let glob = matcher(source_tree());
        assert_eq!(
            glob.match_all(&["src/*.c", "src/**.c"], MatchKind::Files, &Excludes::default())
                .unwrap(),
            vec!["src/a.c", "src/b.c", "src/sub/c.c"]
        );
    }

    #[test]
    fn test_match_all_keeps_first_occurrence_order() {
        let glob = matcher(source_tree());
        let masks = ["src/b.c", "src/*.c", "src/b.c", "src/sub/*.c", "src/**.c"];
        assert_eq!(
            glob.match_all(&masks, MatchKind::Files, &Excludes::default())
                .unwrap(),
            vec!["src/b.c", "src/a.c", "src/sub/c.c"]
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        let glob = GlobMatcher::new(Arc::new(MemoryFs::new().with_file("Src/Main.C")), true);
        assert_eq!(glob.match_files("Src/*.c").unwrap(), vec!["Src/Main.C"]);
    }
}
