//! Filesystem port: single-level directory listing and primitive mutations.
//!
//! The engine never walks a tree through this port directly; it asks for one
//! directory level at a time and builds recursion on top. Implementations
//! live in adapters (e.g. `forgefs-runtime::StdFileSystem`).

use std::fmt;
use std::io;

use thiserror::Error;

/// Kind of a directory entry, after following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (or anything that is not a directory).
    File,
    /// Directory.
    Dir,
}

/// One entry of a single-level directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Literal entry name, without any directory part.
    pub name: String,
    /// File or directory.
    pub kind: EntryKind,
    /// Whether the entry itself is a symbolic link.
    pub is_symlink: bool,
}

impl DirEntry {
    /// Create a regular file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            is_symlink: false,
        }
    }

    /// Create a directory entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
            is_symlink: false,
        }
    }

    /// Mark this entry as a symbolic link.
    #[must_use]
    pub const fn symlinked(mut self) -> Self {
        self.is_symlink = true;
        self
    }

    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Dir)
    }

    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// `.` or `..`.
    pub fn is_marker(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Primitive operation that produced an [`FsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    ReadDir,
    CreateDir,
    RemoveDir,
    RemoveFile,
    ReadFile,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::ReadDir => "cannot open directory",
            Self::CreateDir => "cannot create directory",
            Self::RemoveDir => "cannot remove directory",
            Self::RemoveFile => "cannot remove file",
            Self::ReadFile => "cannot read file",
        };
        f.write_str(verb)
    }
}

/// A failed filesystem primitive, carrying the OS-provided cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{op} '{path}': {reason}")]
pub struct FsError {
    /// Which primitive failed.
    pub op: FsOp,
    /// Path the primitive was applied to.
    pub path: String,
    /// Coarse classification of the failure.
    pub kind: io::ErrorKind,
    /// Human-readable cause as reported by the OS.
    pub reason: String,
}

impl FsError {
    /// Build an error from an `io::Error`.
    pub fn from_io(op: FsOp, path: impl Into<String>, err: &io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    /// Build an error from a kind and message (used by non-OS adapters).
    pub fn new(op: FsOp, path: impl Into<String>, kind: io::ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            kind,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == io::ErrorKind::NotFound
    }
}

/// Port for the raw filesystem primitives the engine is built on.
///
/// Paths are `/`-separated strings. `""` is never passed; the engine uses
/// `"."` for the current directory.
pub trait FileSystemPort: Send + Sync {
    /// List one directory level in native enumeration order.
    fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>, FsError>;

    /// Whether `path` exists and is a file.
    fn is_file(&self, path: &str) -> bool;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Create a single directory; the parent must exist.
    fn create_dir(&self, path: &str) -> Result<(), FsError>;

    /// Remove a single empty directory.
    fn remove_dir(&self, path: &str) -> Result<(), FsError>;

    /// Remove a single file.
    fn remove_file(&self, path: &str) -> Result<(), FsError>;

    /// Read a whole text file.
    fn read_to_string(&self, path: &str) -> Result<String, FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_display_carries_cause() {
        let err = FsError::new(
            FsOp::CreateDir,
            "out/obj",
            io::ErrorKind::PermissionDenied,
            "Permission denied (os error 13)",
        );
        assert_eq!(
            err.to_string(),
            "cannot create directory 'out/obj': Permission denied (os error 13)"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_dir_entry_markers() {
        assert!(DirEntry::dir(".").is_marker());
        assert!(DirEntry::dir("..").is_marker());
        assert!(!DirEntry::dir(".git").is_marker());
        assert!(DirEntry::dir("sub").symlinked().is_symlink);
    }
}
