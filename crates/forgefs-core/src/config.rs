//! Engine configuration.
//!
//! All fields are optional in serialized form; missing fields take the
//! defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default environment variable consulted by `locate`.
pub const DEFAULT_SCRIPT_PATH_VAR: &str = "FORGEFS_PATH";

/// Errors raised by [`EngineConfig::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("script_path_var cannot be empty")]
    EmptyScriptPathVar,

    #[error("ld_conf_roots entry '{0}' must be empty or absolute")]
    RelativeLdConfRoot(String),
}

/// Engine-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Explicit script-search directories (or path lists) for `locate`.
    pub script_dirs: Vec<String>,

    /// Environment variable holding an extra script search path.
    pub script_path_var: String,

    /// Directories searched before everything else by `find_library`.
    pub library_dirs: Vec<String>,

    /// Prefixes whose `etc/ld.so.conf` is parsed on hosts that use one.
    pub ld_conf_roots: Vec<String>,

    /// Case mode for mask matching; `None` follows the host convention.
    pub case_insensitive: Option<bool>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            script_dirs: Vec::new(),
            script_path_var: DEFAULT_SCRIPT_PATH_VAR.to_string(),
            library_dirs: Vec::new(),
            ld_conf_roots: vec![String::new(), "/opt".to_string()],
            case_insensitive: None,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.script_path_var.trim().is_empty() {
            return Err(ConfigError::EmptyScriptPathVar);
        }
        if let Some(root) = self
            .ld_conf_roots
            .iter()
            .find(|root| !root.is_empty() && !root.starts_with('/'))
        {
            return Err(ConfigError::RelativeLdConfRoot(root.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.script_path_var, "FORGEFS_PATH");
        assert_eq!(config.ld_conf_roots, vec!["", "/opt"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"library_dirs": ["/vendor/lib"]}"#).unwrap();
        assert_eq!(config.library_dirs, vec!["/vendor/lib"]);
        assert_eq!(config.script_path_var, DEFAULT_SCRIPT_PATH_VAR);
        assert_eq!(config.case_insensitive, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig {
            script_path_var: "  ".to_string(),
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyScriptPathVar));

        let config = EngineConfig {
            ld_conf_roots: vec!["opt".to_string()],
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RelativeLdConfRoot("opt".to_string()))
        );
    }
}
