//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the forgefs engine.
///
/// Global options shape the engine configuration; the subcommand picks the
/// operation.
#[derive(Debug, Parser)]
#[command(name = "forgefs")]
#[command(about = "Glob, search and mutate directory trees the way build scripts do")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Load engine configuration from a JSON file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra script directories searched by `locate` (path-list separated)
    #[arg(long, global = true, env = "FORGEFS_SCRIPTS", value_name = "DIRS")]
    pub scripts: Option<String>,

    /// Extra library directories searched first by `find-lib` (path-list separated)
    #[arg(long, global = true, env = "FORGEFS_LIBDIRS", value_name = "DIRS")]
    pub libdirs: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
