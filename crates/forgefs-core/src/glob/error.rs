//! Glob-related error types.

use thiserror::Error;

/// Errors that can occur while matching a mask.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GlobError {
    /// A mask or exclude pattern did not compile.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
