//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the engine expects from the host. They
//! contain no OS-specific code; adapters in `forgefs-runtime` implement them.
//!
//! # Design Rules
//!
//! - Paths cross every port as `/`-separated strings
//! - One directory level per call; recursion belongs to the engine
//! - Every port is `Send + Sync` so a composed engine can be shared

pub mod command_runner;
pub mod diagnostics;
pub mod environment;
pub mod filesystem;
pub mod host_probe;
pub mod uuid_source;

use std::sync::Arc;

pub use command_runner::{CommandRunner, ProcessError};
pub use diagnostics::{DiagnosticSink, TracingDiagnostics};
pub use environment::EnvironmentPort;
pub use filesystem::{DirEntry, EntryKind, FileSystemPort, FsError, FsOp};
pub use host_probe::HostProbe;
pub use uuid_source::{DefaultUuidSource, UuidSource};

#[cfg(test)]
pub use command_runner::MockCommandRunner;
#[cfg(test)]
pub use host_probe::MockHostProbe;

/// Container for all port trait objects.
///
/// This struct provides a consistent way to wire adapters into an
/// [`Engine`](crate::Engine) without coupling the engine to concrete
/// implementations.
///
/// # Example
///
/// ```ignore
/// let ports = Ports::new(fs, env, commands, host);
/// let engine = Engine::new(ports, EngineConfig::default())?;
/// ```
#[derive(Clone)]
pub struct Ports {
    /// Raw, non-normalizing filesystem primitives.
    pub fs: Arc<dyn FileSystemPort>,
    /// Environment variable access.
    pub env: Arc<dyn EnvironmentPort>,
    /// Shell command execution for probes.
    pub commands: Arc<dyn CommandRunner>,
    /// Host identity and native capability checks.
    pub host: Arc<dyn HostProbe>,
    /// Identifier generation.
    pub uuids: Arc<dyn UuidSource>,
    /// Warning and error sink.
    pub diagnostics: Arc<dyn DiagnosticSink>,
}

impl Ports {
    /// Create a port container with the default identifier source and the
    /// `tracing` diagnostic sink.
    pub fn new(
        fs: Arc<dyn FileSystemPort>,
        env: Arc<dyn EnvironmentPort>,
        commands: Arc<dyn CommandRunner>,
        host: Arc<dyn HostProbe>,
    ) -> Self {
        Self {
            fs,
            env,
            commands,
            host,
            uuids: Arc::new(DefaultUuidSource),
            diagnostics: Arc::new(TracingDiagnostics::new()),
        }
    }

    /// Replace the identifier source.
    #[must_use]
    pub fn with_uuids(mut self, uuids: Arc<dyn UuidSource>) -> Self {
        self.uuids = uuids;
        self
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
