//! OS adapters for the `forgefs-core` ports.
//!
//! Everything that touches the real filesystem, the process environment or
//! a shell lives here. [`build_engine`] wires the adapters into an
//! [`Engine`]; it is what the CLI and embedding runtimes call.
#![deny(unsafe_code)]

mod env;
mod fs;
pub mod system;

pub use env::ProcessEnvironment;
pub use fs::StdFileSystem;
pub use system::{NativeHostProbe, ShellCommandRunner};

use std::sync::Arc;

use forgefs_core::{ConfigError, Engine, EngineConfig, Ports};

/// The port container backed by the running host.
pub fn native_ports() -> Ports {
    Ports::new(
        Arc::new(StdFileSystem::new()),
        Arc::new(ProcessEnvironment::new()),
        Arc::new(ShellCommandRunner::new()),
        Arc::new(NativeHostProbe::new()),
    )
}

/// Compose an engine over the native adapters.
pub fn build_engine(config: EngineConfig) -> Result<Engine, ConfigError> {
    Engine::new(native_ports(), config)
}
