//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from the engine errors to exit codes and user-facing messages.

use forgefs_core::{ConfigError, GlobError, MutateError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A lookup found nothing.
    #[error("{0} not found")]
    NotFound(String),

    /// Argument or mask error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: Nothing found
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<GlobError> for CliError {
    fn from(err: GlobError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<MutateError> for CliError {
    fn from(err: MutateError) -> Self {
        match err {
            MutateError::Match(glob_err) => glob_err.into(),
            MutateError::Create(_) | MutateError::Remove(_) => Self::Io(err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgefs_core::{FsError, FsOp};

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::NotFound("png".into()).exit_code(), 1);
        assert_eq!(CliError::Arguments(String::new()).exit_code(), 2);
        assert_eq!(CliError::Io(String::new()).exit_code(), 74);
        assert_eq!(CliError::Config(String::new()).exit_code(), 78);
    }

    #[test]
    fn test_engine_errors_map_to_categories() {
        let invalid = GlobError::InvalidPattern {
            pattern: "(".into(),
            reason: "unclosed group".into(),
        };
        assert!(matches!(CliError::from(invalid.clone()), CliError::Arguments(_)));
        assert!(matches!(
            CliError::from(MutateError::Match(invalid)),
            CliError::Arguments(_)
        ));

        let fs_err = FsError::new(
            FsOp::RemoveDir,
            "out",
            std::io::ErrorKind::PermissionDenied,
            "Permission denied",
        );
        let err = CliError::from(MutateError::Remove(fs_err));
        assert!(matches!(err, CliError::Io(ref msg) if msg.contains("Permission denied")));
    }
}
