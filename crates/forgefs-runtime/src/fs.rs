//! `std::fs` implementation of the filesystem port.

use std::fs;
use std::path::Path;

use forgefs_core::{DirEntry, FileSystemPort, FsError, FsOp};
use tracing::debug;

/// Single-level filesystem primitives over `std::fs`.
///
/// Directory entries that are symbolic links are classified by their target
/// and flagged with `is_symlink`, so the walker can match them without
/// descending. Dangling links are left out of listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl StdFileSystem {
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystemPort for StdFileSystem {
    fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>, FsError> {
        let entries = fs::read_dir(dir).map_err(|e| FsError::from_io(FsOp::ReadDir, dir, &e))?;

        let mut listing = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::from_io(FsOp::ReadDir, dir, &e))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            let Ok(file_type) = entry.file_type() else {
                debug!(dir, name = %name, "Skipping entry with unknown type");
                continue;
            };

            let is_symlink = file_type.is_symlink();
            let is_dir = if is_symlink {
                match fs::metadata(entry.path()) {
                    Ok(target) => target.is_dir(),
                    Err(_) => {
                        debug!(dir, name = %name, "Skipping dangling symlink");
                        continue;
                    }
                }
            } else {
                file_type.is_dir()
            };

            let entry = if is_dir {
                DirEntry::dir(name)
            } else {
                DirEntry::file(name)
            };
            listing.push(if is_symlink { entry.symlinked() } else { entry });
        }
        Ok(listing)
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn create_dir(&self, path: &str) -> Result<(), FsError> {
        fs::create_dir(path).map_err(|e| FsError::from_io(FsOp::CreateDir, path, &e))
    }

    fn remove_dir(&self, path: &str) -> Result<(), FsError> {
        fs::remove_dir(path).map_err(|e| FsError::from_io(FsOp::RemoveDir, path, &e))
    }

    fn remove_file(&self, path: &str) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|e| FsError::from_io(FsOp::RemoveFile, path, &e))
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        fs::read_to_string(path).map_err(|e| FsError::from_io(FsOp::ReadFile, path, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path_of(dir: &TempDir, leaf: &str) -> String {
        dir.path().join(leaf).to_string_lossy().replace('\\', "/")
    }

    #[test]
    fn test_read_dir_classifies_entries() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let mut listing = StdFileSystem::new()
            .read_dir(&path_of(&tmp, ""))
            .unwrap();
        listing.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(listing, vec![DirEntry::file("a.txt"), DirEntry::dir("sub")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_is_flagged() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling")).unwrap();

        let listing = StdFileSystem::new()
            .read_dir(&path_of(&tmp, ""))
            .unwrap();
        let link = listing.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_dir());
        assert!(link.is_symlink);
        assert!(!listing.iter().any(|e| e.name == "dangling"));
    }

    #[test]
    fn test_errors_carry_os_cause() {
        let tmp = TempDir::new().unwrap();
        let missing = path_of(&tmp, "missing");
        let err = StdFileSystem::new().read_dir(&missing).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.op, FsOp::ReadDir);
        assert_eq!(err.path, missing);
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_single_level_primitives() {
        let tmp = TempDir::new().unwrap();
        let fs_port = StdFileSystem::new();
        let dir = path_of(&tmp, "d");

        fs_port.create_dir(&dir).unwrap();
        assert!(fs_port.is_dir(&dir));
        assert!(fs_port.create_dir(&format!("{dir}/x/y")).is_err());

        let file = format!("{dir}/f.txt");
        fs::write(&file, "hello").unwrap();
        assert!(fs_port.is_file(&file));
        assert_eq!(fs_port.read_to_string(&file).unwrap(), "hello");
        assert!(fs_port.remove_dir(&dir).is_err());

        fs_port.remove_file(&file).unwrap();
        fs_port.remove_dir(&dir).unwrap();
        assert!(!fs_port.is_dir(&dir));
    }
}
