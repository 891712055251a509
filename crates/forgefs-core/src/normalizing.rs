//! Normalizing decorator around a raw filesystem port.
//!
//! The engine composes every raw [`FileSystemPort`] with this layer at
//! construction time, so components never pass un-normalized paths to OS
//! primitives.

use std::sync::Arc;

use crate::paths::normalize;
use crate::ports::{DirEntry, FileSystemPort, FsError};

/// [`FileSystemPort`] that normalizes every path argument before
/// delegating to the wrapped port.
pub struct NormalizingFs {
    inner: Arc<dyn FileSystemPort>,
}

impl NormalizingFs {
    pub fn new(inner: Arc<dyn FileSystemPort>) -> Self {
        Self { inner }
    }
}

impl FileSystemPort for NormalizingFs {
    fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>, FsError> {
        self.inner.read_dir(&normalize(dir))
    }

    fn is_file(&self, path: &str) -> bool {
        self.inner.is_file(&normalize(path))
    }

    fn is_dir(&self, path: &str) -> bool {
        self.inner.is_dir(&normalize(path))
    }

    fn create_dir(&self, path: &str) -> Result<(), FsError> {
        self.inner.create_dir(&normalize(path))
    }

    fn remove_dir(&self, path: &str) -> Result<(), FsError> {
        self.inner.remove_dir(&normalize(path))
    }

    fn remove_file(&self, path: &str) -> Result<(), FsError> {
        self.inner.remove_file(&normalize(path))
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        self.inner.read_to_string(&normalize(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the paths it is called with.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn record(&self, path: &str) {
            self.calls.lock().unwrap().push(path.to_string());
        }
    }

    impl FileSystemPort for Recorder {
        fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>, FsError> {
            self.record(dir);
            Ok(Vec::new())
        }
        fn is_file(&self, path: &str) -> bool {
            self.record(path);
            false
        }
        fn is_dir(&self, path: &str) -> bool {
            self.record(path);
            false
        }
        fn create_dir(&self, path: &str) -> Result<(), FsError> {
            self.record(path);
            Ok(())
        }
        fn remove_dir(&self, path: &str) -> Result<(), FsError> {
            self.record(path);
            Ok(())
        }
        fn remove_file(&self, path: &str) -> Result<(), FsError> {
            self.record(path);
            Ok(())
        }
        fn read_to_string(&self, path: &str) -> Result<String, FsError> {
            self.record(path);
            Ok(String::new())
        }
    }

    #[test]
    fn test_every_primitive_sees_normalized_paths() {
        let recorder = Arc::new(Recorder::default());
        let fs = NormalizingFs::new(recorder.clone());

        fs.read_dir("src\\sub\\").unwrap();
        fs.is_file("./a//b.c");
        fs.is_dir("x/../y");
        fs.create_dir("out/./obj").unwrap();
        fs.remove_dir("out\\obj").unwrap();
        fs.remove_file("out//a.o").unwrap();
        fs.read_to_string("/etc//ld.so.conf").unwrap();

        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["src/sub", "a/b.c", "y", "out/obj", "out/obj", "out/a.o", "/etc/ld.so.conf"]
        );
    }
}
