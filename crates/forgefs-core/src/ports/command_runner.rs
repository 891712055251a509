//! Command runner port for blocking shell execution with captured output.
//!
//! Used by the platform probe to ask the host shell for architecture
//! strings (`uname -m`, `echo $HOSTTYPE`).

use thiserror::Error;

/// Errors that can occur while running a probe command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The command could not be started.
    #[error("Failed to spawn '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The command ran but reported failure.
    #[error("'{command}' exited with status {status}")]
    NonZeroExit { command: String, status: i32 },
}

/// Port for running a shell command to completion and capturing stdout.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` through the host shell and return its trimmed stdout.
    fn output_of(&self, command: &str) -> Result<String, ProcessError>;
}
