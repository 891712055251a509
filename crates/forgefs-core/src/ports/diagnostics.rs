//! Diagnostic sink port for warnings and errors raised by the engine.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Port for user-visible diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Emit `message` unless a warning with the same `key` was already emitted.
    fn warn_once(&self, key: &str, message: &str);

    /// Emit a general error diagnostic.
    fn error(&self, message: &str);
}

/// Default sink: deduplicates warnings by key and logs through `tracing`.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    warned: Mutex<HashSet<String>>,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn warn_once(&self, key: &str, message: &str) {
        let first = self
            .warned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string());
        if first {
            tracing::warn!(key, "{message}");
        }
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}
