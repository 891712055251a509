//! Ordered multi-directory lookup for libraries and scripts.
//!
//! Both searches assemble a [`SearchPath`] fresh on every call (environment
//! values are never cached) and return the first hit. For libraries the
//! naming conventions form the outer loop: every directory is tried with
//! `libfoo.so` before any directory is tried with `foo.so`.

mod ld_conf;
mod library;
mod search_path;

use std::sync::Arc;

use tracing::debug;

pub use ld_conf::parse_ld_so_conf;
pub use library::{
    DEFAULT_LIBRARY_DIRS, DEFAULT_LIBRARY_DIRS_64, LibraryNameFormat, has_default_library_dirs,
    library_path_var, reads_ld_so_conf,
};
pub use search_path::SearchPath;

use crate::config::EngineConfig;
use crate::glob::GlobMatcher;
use crate::paths::{directory_of, join, normalize, path_list_separator};
use crate::platform::{HostOs, PlatformProbe};
use crate::ports::{EnvironmentPort, FileSystemPort};

/// Library and script locator.
#[derive(Clone)]
pub struct PathSearch {
    fs: Arc<dyn FileSystemPort>,
    env: Arc<dyn EnvironmentPort>,
    platform: Arc<PlatformProbe>,
    glob: GlobMatcher,
    config: Arc<EngineConfig>,
}

impl PathSearch {
    pub fn new(
        fs: Arc<dyn FileSystemPort>,
        env: Arc<dyn EnvironmentPort>,
        platform: Arc<PlatformProbe>,
        glob: GlobMatcher,
        config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            fs,
            env,
            platform,
            glob,
            config,
        }
    }

    fn separator(&self) -> char {
        path_list_separator(matches!(self.platform.os(), HostOs::Windows))
    }

    /// Directory in `path` that contains `file_name`, if any.
    pub fn path_search(&self, file_name: &str, path: &SearchPath) -> Option<String> {
        path.find_dir(self.fs.as_ref(), file_name).map(str::to_string)
    }

    /// The directories [`find_library`](Self::find_library) consults, in
    /// precedence order.
    pub fn library_search_path(&self, extra_dirs: &[String]) -> SearchPath {
        let os = self.platform.os();
        let separator = self.separator();
        let mut path = SearchPath::new();

        for dir in extra_dirs.iter().chain(&self.config.library_dirs) {
            path.push_list(dir, separator);
        }

        if let Some(value) = self.env.var(library_path_var(os)) {
            path.push_list(&value, separator);
        }

        if reads_ld_so_conf(os) {
            for root in &self.config.ld_conf_roots {
                let conf_file = format!("{}/etc/ld.so.conf", root.trim_end_matches('/'));
                if self.fs.is_file(&conf_file) {
                    path.extend(parse_ld_so_conf(self.fs.as_ref(), &self.glob, &conf_file));
                }
            }
        }

        if has_default_library_dirs(os) {
            if self.platform.is_64bit() && !matches!(os, HostOs::MacOsX) {
                path.extend(DEFAULT_LIBRARY_DIRS_64.iter().copied());
            }
            path.extend(DEFAULT_LIBRARY_DIRS.iter().copied());
        }

        path
    }

    /// Full path of the shared library `name`, or `None`.
    pub fn find_library(&self, name: &str) -> Option<String> {
        self.find_library_in(name, &[])
    }

    /// Like [`find_library`](Self::find_library), searching `extra_dirs`
    /// before everything else.
    pub fn find_library_in(&self, name: &str, extra_dirs: &[String]) -> Option<String> {
        let path = self.library_search_path(extra_dirs);
        for format in LibraryNameFormat::for_host(self.platform.os()) {
            let file_name = format.file_name(name);
            if let Some(dir) = path.find_dir(self.fs.as_ref(), &file_name) {
                let found = join(dir, &file_name);
                debug!(library = name, path = %found, "Library found");
                return Some(found);
            }
        }
        debug!(library = name, searched = path.dirs().len(), "Library not found");
        None
    }

    /// The directories [`locate`](Self::locate) consults, in precedence order.
    pub fn script_search_path(&self) -> SearchPath {
        let separator = self.separator();
        let mut path = SearchPath::new();
        for dir in &self.config.script_dirs {
            path.push_list(dir, separator);
        }
        if let Some(value) = self.env.var(&self.config.script_path_var) {
            path.push_list(&value, separator);
        }
        if let Some(exe) = self.env.executable_path() {
            let dir = directory_of(&normalize(&exe));
            if !dir.is_empty() {
                path.push(dir);
            }
        }
        path
    }

    /// First candidate that exists as given or inside the script search path.
    pub fn locate<S: AsRef<str>>(&self, names: &[S]) -> Option<String> {
        let path = self.script_search_path();
        names.iter().find_map(|name| {
            let name = name.as_ref();
            if self.fs.is_file(name) {
                return Some(name.to_string());
            }
            path.find_dir(self.fs.as_ref(), name)
                .map(|dir| join(dir, name))
        })
    }
}

impl std::fmt::Debug for PathSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathSearch")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
