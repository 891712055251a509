//! Filesystem services for build scripting runtimes.
//!
//! `forgefs-core` holds the engine: wildcard masks compiled to anchored
//! regexes, a two-pass directory walker, ordered library and script lookup,
//! recursive directory creation and removal, host detection, and a UUID
//! registry. All host access goes through the traits in [`ports`]; OS
//! adapters live in `forgefs-runtime`.
#![deny(unused_crate_dependencies)]

pub mod config;
mod engine;
pub mod glob;
pub mod mutate;
pub mod normalizing;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod search;
pub mod uuid_registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{ConfigError, DEFAULT_SCRIPT_PATH_VAR, EngineConfig};
pub use engine::Engine;
pub use glob::{ExcludeRule, Excludes, GlobError, GlobMatcher, MatchKind, MatchedPath};
pub use mutate::{MutateError, RemoveTarget, TreeMutator};
pub use normalizing::NormalizingFs;
pub use platform::{HostOs, PlatformProbe};
pub use ports::{
    CommandRunner, DefaultUuidSource, DiagnosticSink, DirEntry, EntryKind, EnvironmentPort,
    FileSystemPort, FsError, FsOp, HostProbe, Ports, ProcessError, TracingDiagnostics, UuidSource,
};
pub use search::{LibraryNameFormat, PathSearch, SearchPath};
pub use uuid_registry::UuidRegistry;

// serde_json is only exercised by config tests
#[cfg(test)]
use serde_json as _;
