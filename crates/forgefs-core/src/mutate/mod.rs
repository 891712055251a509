//! Recursive directory creation and removal.
//!
//! `make_dirs` and `remove_all` are fail-fast: the first failure stops the
//! operation and is returned, and nothing already done is rolled back.
//! `remove_dir_recursive` is best-effort for everything below the target;
//! failures there are reported to the [`DiagnosticSink`].

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::glob::{Excludes, GlobError, GlobMatcher, MatchKind};
use crate::paths::{is_absolute, join, normalize};
use crate::ports::{DiagnosticSink, FileSystemPort, FsError};

/// Errors that can occur during tree mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutateError {
    /// A directory could not be created.
    #[error("{0}")]
    Create(#[source] FsError),

    /// A file or directory could not be removed.
    #[error("{0}")]
    Remove(#[source] FsError),

    /// Expanding a removal mask failed.
    #[error(transparent)]
    Match(#[from] GlobError),
}

impl MutateError {
    /// The OS-provided cause, when the failure came from a primitive.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Create(err) | Self::Remove(err) => Some(err.reason.as_str()),
            Self::Match(_) => None,
        }
    }
}

/// What [`TreeMutator::remove_all`] should delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// A literal path or a file mask.
    Mask(String),
    /// Several targets, processed in order.
    List(Vec<RemoveTarget>),
}

impl From<&str> for RemoveTarget {
    fn from(mask: &str) -> Self {
        Self::Mask(mask.to_string())
    }
}

impl From<String> for RemoveTarget {
    fn from(mask: String) -> Self {
        Self::Mask(mask)
    }
}

impl<T: Into<Self>> From<Vec<T>> for RemoveTarget {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Tree mutations built on single-level primitives and [`GlobMatcher`].
#[derive(Clone)]
pub struct TreeMutator {
    fs: Arc<dyn FileSystemPort>,
    glob: GlobMatcher,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl TreeMutator {
    pub fn new(
        fs: Arc<dyn FileSystemPort>,
        glob: GlobMatcher,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            fs,
            glob,
            diagnostics,
        }
    }

    /// Create `path` and every missing ancestor, root to leaf.
    ///
    /// Segments that already are directories are skipped, so calling this
    /// twice succeeds both times. On failure the ancestors created so far
    /// stay in place.
    pub fn make_dirs(&self, path: &str) -> Result<(), MutateError> {
        let path = normalize(path);
        let mut current = if path.starts_with('/') {
            "/".to_string()
        } else {
            String::new()
        };

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push_str(segment);
            if segment != "." && segment != ".." && !is_absolute(segment) && !self.fs.is_dir(&current) {
                debug!(dir = %current, "Creating directory");
                self.fs.create_dir(&current).map_err(MutateError::Create)?;
            }
            current.push('/');
        }
        Ok(())
    }

    /// Remove every file matched by `target`, stopping at the first failure.
    ///
    /// Masks are expanded in file mode, so directories are never removed
    /// here. A mask that matches nothing succeeds.
    pub fn remove_all(&self, target: &RemoveTarget) -> Result<(), MutateError> {
        match target {
            RemoveTarget::Mask(mask) => {
                for file in self.glob.match_files(mask)? {
                    debug!(file = %file, "Removing file");
                    self.fs.remove_file(&file).map_err(MutateError::Remove)?;
                }
                Ok(())
            }
            RemoveTarget::List(items) => items.iter().try_for_each(|item| self.remove_all(item)),
        }
    }

    /// Remove `path` and everything below it, children before parents.
    ///
    /// Hidden entries are removed too. A symlinked subdirectory is unlinked,
    /// never walked, so nothing outside `path` is touched. Failures below
    /// `path` go to the diagnostic sink and are skipped; only failing to
    /// remove `path` itself is returned.
    pub fn remove_dir_recursive(&self, path: &str) -> Result<(), MutateError> {
        let path = normalize(path);
        let children = join(&path, "*");

        match self
            .glob
            .match_entries(&children, MatchKind::Dirs, &Excludes::everything())
        {
            Ok(dirs) => {
                for dir in dirs {
                    let removed = if dir.is_symlink {
                        self.unlink(&dir.path)
                    } else {
                        self.remove_dir_recursive(&dir.path)
                    };
                    if let Err(err) = removed {
                        self.diagnostics.error(&err.to_string());
                    }
                }
            }
            Err(err) => self.diagnostics.error(&err.to_string()),
        }

        match self
            .glob
            .match_paths(&children, MatchKind::Files, &Excludes::everything())
        {
            Ok(files) => {
                for file in files {
                    if let Err(err) = self.fs.remove_file(&file) {
                        self.diagnostics.error(&err.to_string());
                    }
                }
            }
            Err(err) => self.diagnostics.error(&err.to_string()),
        }

        debug!(dir = %path, "Removing directory");
        self.fs.remove_dir(&path).map_err(MutateError::Remove)
    }

    /// Remove a directory symlink itself, leaving its target alone.
    ///
    /// Unix unlinks directory links as files; Windows wants `rmdir`, which
    /// removes the link and not the target.
    fn unlink(&self, link: &str) -> Result<(), MutateError> {
        debug!(link, "Unlinking symlinked directory");
        self.fs
            .remove_file(link)
            .or_else(|_| self.fs.remove_dir(link))
            .map_err(MutateError::Remove)
    }
}

impl std::fmt::Debug for TreeMutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeMutator").finish_non_exhaustive()
    }
}
