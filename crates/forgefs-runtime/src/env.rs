use forgefs_core::EnvironmentPort;

/// Reads the live process environment on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub const fn new() -> Self {
        Self
    }
}

impl EnvironmentPort for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        // Unset and non-UTF-8 values are both treated as absent.
        std::env::var(key).ok()
    }

    fn executable_path(&self) -> Option<String> {
        std::env::current_exe()
            .ok()
            .map(|path| path.to_string_lossy().into_owned())
    }
}
