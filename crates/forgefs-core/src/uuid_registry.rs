//! Identifier generation with name-collision bookkeeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::ports::{DiagnosticSink, UuidSource};

/// Remembers which name produced each identifier.
///
/// Two different names mapping to the same identifier would make generated
/// project files ambiguous, so the registry warns (once per identifier)
/// when that happens. Collisions never fail generation.
pub struct UuidRegistry {
    source: Arc<dyn UuidSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
    names: Mutex<HashMap<Uuid, String>>,
}

impl UuidRegistry {
    pub fn new(source: Arc<dyn UuidSource>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            source,
            diagnostics,
            names: Mutex::new(HashMap::new()),
        }
    }

    /// Generate an identifier, recording `name` as its producer.
    pub fn generate(&self, name: Option<&str>) -> Uuid {
        let id = self.source.generate(name);
        let Some(name) = name else {
            return id;
        };

        let previous = self
            .names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, name.to_string());
        if let Some(previous) = previous.filter(|previous| previous != name) {
            let key = id.to_string();
            self.diagnostics.warn_once(
                &key,
                &format!("Identifier collision between '{previous}' and '{name}' ({key})"),
            );
        }
        id
    }

    /// Name recorded for `id`, if any.
    pub fn name_of(&self, id: &Uuid) -> Option<String> {
        self.names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}

impl std::fmt::Debug for UuidRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("UuidRegistry")
            .field("names", &count)
            .finish_non_exhaustive()
    }
}
