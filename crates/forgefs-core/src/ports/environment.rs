//! Environment port: variable lookup and the running executable's location.

/// Port for reading process environment state.
///
/// Reads are never cached by the engine; every search re-reads the values
/// it needs.
pub trait EnvironmentPort: Send + Sync {
    /// Value of an environment variable, `None` when unset or not unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Full path of the running executable, if it can be determined.
    fn executable_path(&self) -> Option<String>;
}
