//! Host identity and shell probing for the platform queries.
//!
//! `NativeHostProbe` answers what can be known without running anything;
//! `ShellCommandRunner` backs the engine's `uname -m` / `$HOSTTYPE` fallback.

mod commands;

pub use commands::ShellCommandRunner;

use forgefs_core::{HostOs, HostProbe};

/// Native implementation of [`HostProbe`].
///
/// The operating system comes from the compile target. The 64-bit answer
/// is decided natively for 64-bit builds and for 32-bit Windows processes
/// running under WOW64; anything else is left to the engine's probes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHostProbe;

impl NativeHostProbe {
    pub const fn new() -> Self {
        Self
    }
}

impl HostProbe for NativeHostProbe {
    fn os(&self) -> HostOs {
        HostOs::from_target_os(std::env::consts::OS)
    }

    fn native_is_64bit(&self) -> Option<bool> {
        if cfg!(target_pointer_width = "64") {
            return Some(true);
        }
        if cfg!(windows) && std::env::var_os("PROCESSOR_ARCHITEW6432").is_some() {
            return Some(true);
        }
        None
    }
}
