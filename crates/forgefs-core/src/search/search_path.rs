//! Ordered directory lists and first-match lookup.

use crate::paths::{join, normalize, split_path_list};
use crate::ports::FileSystemPort;

/// Ordered list of directories; earlier entries take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<String>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one directory in `/` form. Empty strings are ignored.
    pub fn push(&mut self, dir: impl Into<String>) {
        let dir = dir.into();
        if !dir.trim().is_empty() {
            self.dirs.push(normalize(dir.trim()));
        }
    }

    /// Append every directory of a path-list value such as `PATH`.
    pub fn push_list(&mut self, value: &str, separator: char) {
        self.extend(split_path_list(value, separator));
    }

    pub fn extend<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for dir in dirs {
            self.push(dir);
        }
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// First directory that contains a file called `file_name`.
    pub fn find_dir(&self, fs: &dyn FileSystemPort, file_name: &str) -> Option<&str> {
        self.dirs
            .iter()
            .map(String::as_str)
            .find(|dir| fs.is_file(&join(dir, file_name)))
    }
}

impl<S: Into<String>> FromIterator<S> for SearchPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut path = Self::new();
        path.extend(iter);
        path
    }
}
