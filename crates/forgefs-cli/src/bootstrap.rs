//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: logging is installed, the engine configuration is
//! assembled from file and flags, and the native adapters from
//! `forgefs-runtime` are composed into an [`Engine`].

use std::fs;
use std::path::Path;

use forgefs_core::{Engine, EngineConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::parser::Cli;

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read an [`EngineConfig`] from a JSON file.
pub fn load_config_file(path: &Path) -> Result<EngineConfig, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config: EngineConfig = serde_json::from_str(&text)?;
    Ok(config)
}

/// Build the engine configuration for this invocation.
///
/// Directories given by flag (or their environment fallbacks) are searched
/// before those listed in the config file.
pub fn build_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => EngineConfig::default(),
    };

    if let Some(dirs) = cli.scripts.as_deref().filter(|d| !d.trim().is_empty()) {
        config.script_dirs.insert(0, dirs.to_string());
    }
    if let Some(dirs) = cli.libdirs.as_deref().filter(|d| !d.trim().is_empty()) {
        config.library_dirs.insert(0, dirs.to_string());
    }

    config.validate()?;
    debug!(?config, "Engine configuration");
    Ok(config)
}

/// Compose the engine over the native adapters.
pub fn bootstrap(cli: &Cli) -> Result<Engine, CliError> {
    let config = build_config(cli)?;
    Ok(forgefs_runtime::build_engine(config)?)
}
