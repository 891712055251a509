//! In-memory port implementations for tests.
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to other crates' tests. `MemoryFs` preserves insertion order
//! in listings so tests can assert on "native" enumeration order.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::paths::{directory_of, is_drive, normalize};
use crate::platform::HostOs;
use crate::ports::{
    CommandRunner, DiagnosticSink, DirEntry, EntryKind, EnvironmentPort, FileSystemPort, FsError,
    FsOp, HostProbe, ProcessError, UuidSource,
};

#[derive(Debug, Clone)]
struct Node {
    path: String,
    kind: EntryKind,
    symlink: bool,
    contents: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    nodes: Vec<Node>,
    unreadable: HashSet<String>,
    failing: HashSet<String>,
}

/// Ordered in-memory filesystem.
///
/// `"."` and `"/"` always exist. Adding a node implicitly adds its missing
/// ancestors as directories, in root-to-leaf order.
#[derive(Debug, Default)]
pub struct MemoryFs {
    state: Mutex<MemoryState>,
}

fn key(path: &str) -> String {
    normalize(path)
}

fn parent_key(path: &str) -> String {
    let dir = directory_of(path);
    if dir.is_empty() { ".".to_string() } else { normalize(&dir) }
}

fn is_root(path: &str) -> bool {
    path == "." || path == "/" || is_drive(path)
}

fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, path: &str, kind: EntryKind, symlink: bool, contents: &str) {
        let path = key(path);
        let mut ancestors = Vec::new();
        let mut parent = parent_key(&path);
        while !is_root(&parent) {
            ancestors.push(parent.clone());
            parent = parent_key(&parent);
        }

        let mut state = self.lock();
        for dir in ancestors.into_iter().rev() {
            if !state.nodes.iter().any(|n| n.path == dir) {
                state.nodes.push(Node {
                    path: dir,
                    kind: EntryKind::Dir,
                    symlink: false,
                    contents: String::new(),
                });
            }
        }
        if !state.nodes.iter().any(|n| n.path == path) {
            state.nodes.push(Node {
                path,
                kind,
                symlink,
                contents: contents.to_string(),
            });
        }
    }

    /// Add an empty file.
    #[must_use]
    pub fn with_file(self, path: &str) -> Self {
        self.insert(path, EntryKind::File, false, "");
        self
    }

    /// Add a file with contents.
    #[must_use]
    pub fn with_file_contents(self, path: &str, contents: &str) -> Self {
        self.insert(path, EntryKind::File, false, contents);
        self
    }

    /// Add a directory.
    #[must_use]
    pub fn with_dir(self, path: &str) -> Self {
        self.insert(path, EntryKind::Dir, false, "");
        self
    }

    /// Add a directory that lists as a symbolic link.
    ///
    /// Like a Unix link, it is removed with `remove_file`; `remove_dir`
    /// refuses it.
    #[must_use]
    pub fn with_symlinked_dir(self, path: &str) -> Self {
        self.insert(path, EntryKind::Dir, true, "");
        self
    }

    /// Make listing `path` fail with a permission error.
    #[must_use]
    pub fn with_unreadable(self, path: &str) -> Self {
        self.lock().unreadable.insert(key(path));
        self
    }

    /// Make creating or removing `path` fail with a permission error.
    #[must_use]
    pub fn with_failing(self, path: &str) -> Self {
        self.lock().failing.insert(key(path));
        self
    }

    /// Whether anything exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        let path = key(path);
        is_root(&path) || self.lock().nodes.iter().any(|n| n.path == path)
    }

    /// Every stored path, in insertion order.
    pub fn paths(&self) -> Vec<String> {
        self.lock().nodes.iter().map(|n| n.path.clone()).collect()
    }

    fn kind_of(&self, path: &str) -> Option<EntryKind> {
        let path = key(path);
        if is_root(&path) {
            return Some(EntryKind::Dir);
        }
        self.lock()
            .nodes
            .iter()
            .find(|n| n.path == path)
            .map(|n| n.kind)
    }

    fn denied(op: FsOp, path: &str) -> FsError {
        FsError::new(op, path, io::ErrorKind::PermissionDenied, "Permission denied")
    }

    fn missing(op: FsOp, path: &str) -> FsError {
        FsError::new(op, path, io::ErrorKind::NotFound, "No such file or directory")
    }
}

impl FileSystemPort for MemoryFs {
    fn read_dir(&self, dir: &str) -> Result<Vec<DirEntry>, FsError> {
        let dir = key(dir);
        if self.lock().unreadable.contains(&dir) {
            return Err(Self::denied(FsOp::ReadDir, &dir));
        }
        match self.kind_of(&dir) {
            Some(EntryKind::Dir) => {}
            Some(EntryKind::File) => {
                return Err(FsError::new(
                    FsOp::ReadDir,
                    dir,
                    io::ErrorKind::Other,
                    "Not a directory",
                ));
            }
            None => return Err(Self::missing(FsOp::ReadDir, &dir)),
        }

        let entries = self
            .lock()
            .nodes
            .iter()
            .filter(|n| parent_key(&n.path) == dir)
            .map(|n| DirEntry {
                name: leaf_name(&n.path).to_string(),
                kind: n.kind,
                is_symlink: n.symlink,
            })
            .collect();
        Ok(entries)
    }

    fn is_file(&self, path: &str) -> bool {
        self.kind_of(path) == Some(EntryKind::File)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.kind_of(path) == Some(EntryKind::Dir)
    }

    fn create_dir(&self, path: &str) -> Result<(), FsError> {
        let path = key(path);
        if self.lock().failing.contains(&path) {
            return Err(Self::denied(FsOp::CreateDir, &path));
        }
        if self.exists(&path) {
            return Err(FsError::new(
                FsOp::CreateDir,
                path,
                io::ErrorKind::AlreadyExists,
                "File exists",
            ));
        }
        if !self.is_dir(&parent_key(&path)) {
            return Err(Self::missing(FsOp::CreateDir, &path));
        }
        self.lock().nodes.push(Node {
            path,
            kind: EntryKind::Dir,
            symlink: false,
            contents: String::new(),
        });
        Ok(())
    }

    fn remove_dir(&self, path: &str) -> Result<(), FsError> {
        let path = key(path);
        let mut state = self.lock();
        if state.failing.contains(&path) {
            return Err(Self::denied(FsOp::RemoveDir, &path));
        }
        let Some(idx) = state
            .nodes
            .iter()
            .position(|n| n.path == path && n.kind == EntryKind::Dir)
        else {
            return Err(Self::missing(FsOp::RemoveDir, &path));
        };
        if state.nodes[idx].symlink {
            return Err(FsError::new(
                FsOp::RemoveDir,
                path,
                io::ErrorKind::Other,
                "Not a directory",
            ));
        }
        if state.nodes.iter().any(|n| parent_key(&n.path) == path) {
            return Err(FsError::new(
                FsOp::RemoveDir,
                path,
                io::ErrorKind::Other,
                "Directory not empty",
            ));
        }
        state.nodes.remove(idx);
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<(), FsError> {
        let path = key(path);
        let mut state = self.lock();
        if state.failing.contains(&path) {
            return Err(Self::denied(FsOp::RemoveFile, &path));
        }
        let Some(idx) = state
            .nodes
            .iter()
            .position(|n| n.path == path && (n.kind == EntryKind::File || n.symlink))
        else {
            return Err(Self::missing(FsOp::RemoveFile, &path));
        };
        state.nodes.remove(idx);
        Ok(())
    }

    fn read_to_string(&self, path: &str) -> Result<String, FsError> {
        let path = key(path);
        self.lock()
            .nodes
            .iter()
            .find(|n| n.path == path && n.kind == EntryKind::File)
            .map(|n| n.contents.clone())
            .ok_or_else(|| Self::missing(FsOp::ReadFile, &path))
    }
}

/// Fixed environment variables and executable path.
#[derive(Debug, Default, Clone)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
    executable: Option<String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_executable(mut self, path: &str) -> Self {
        self.executable = Some(path.to_string());
        self
    }
}

impl EnvironmentPort for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn executable_path(&self) -> Option<String> {
        self.executable.clone()
    }
}

/// Canned command outputs; unknown commands fail to spawn.
#[derive(Debug, Default, Clone)]
pub struct ScriptedCommands {
    outputs: HashMap<String, String>,
}

impl ScriptedCommands {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }
}

impl CommandRunner for ScriptedCommands {
    fn output_of(&self, command: &str) -> Result<String, ProcessError> {
        self.outputs
            .get(command)
            .cloned()
            .ok_or_else(|| ProcessError::SpawnFailed {
                command: command.to_string(),
                reason: "not scripted".to_string(),
            })
    }
}

/// Host with a fixed OS and native 64-bit answer.
#[derive(Debug, Clone)]
pub struct FixedHost {
    os: HostOs,
    native_64bit: Option<bool>,
}

impl FixedHost {
    /// A host whose native check is undecided.
    pub const fn new(os: HostOs) -> Self {
        Self {
            os,
            native_64bit: None,
        }
    }

    #[must_use]
    pub const fn with_native_64bit(mut self, answer: Option<bool>) -> Self {
        self.native_64bit = answer;
        self
    }
}

impl HostProbe for FixedHost {
    fn os(&self) -> HostOs {
        self.os.clone()
    }

    fn native_is_64bit(&self) -> Option<bool> {
        self.native_64bit
    }
}

/// Diagnostic sink that records what it emits, deduplicating by key.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    seen: Mutex<HashSet<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn warn_once(&self, key: &str, message: &str) {
        let first = self
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
        if first {
            self.warnings
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(message.to_string());
        }
    }

    fn error(&self, message: &str) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Hands out a fixed sequence of identifiers, ignoring names, then repeats
/// the last one.
#[derive(Debug)]
pub struct SequenceUuids {
    ids: Vec<Uuid>,
    next: AtomicUsize,
}

impl SequenceUuids {
    pub fn new(ids: Vec<Uuid>) -> Self {
        Self {
            ids,
            next: AtomicUsize::new(0),
        }
    }

    /// Always return the same identifier.
    pub fn constant(id: Uuid) -> Self {
        Self::new(vec![id])
    }
}

impl UuidSource for SequenceUuids {
    fn generate(&self, _name: Option<&str>) -> Uuid {
        let idx = self.next.fetch_add(1, Ordering::SeqCst);
        self.ids
            .get(idx)
            .or_else(|| self.ids.last())
            .copied()
            .unwrap_or_else(Uuid::nil)
    }
}
