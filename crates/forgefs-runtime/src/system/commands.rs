//! Blocking shell execution with captured stdout.

use std::process::Command;

use forgefs_core::{CommandRunner, ProcessError};
use tracing::debug;

/// Runs probe commands through `sh -c` (or `cmd /C` on Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub const fn new() -> Self {
        Self
    }

    fn shell(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl CommandRunner for ShellCommandRunner {
    fn output_of(&self, command: &str) -> Result<String, ProcessError> {
        let output = Self::shell(command)
            .output()
            .map_err(|e| ProcessError::SpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProcessError::NonZeroExit {
                command: command.to_string(),
                // Killed by a signal
                status: output.status.code().unwrap_or(-1),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(command, output = %stdout, "Probe command finished");
        Ok(stdout)
    }
}
