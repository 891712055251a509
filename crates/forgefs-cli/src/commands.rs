//! Subcommands, one per engine operation.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List files matching one or more masks (`*` within a segment, `**` across)
    Files {
        #[arg(required = true)]
        masks: Vec<String>,
    },

    /// List directories matching one or more masks
    Dirs {
        #[arg(required = true)]
        masks: Vec<String>,
    },

    /// Print the full path of a shared library
    FindLib {
        /// Logical library name, e.g. "png" for libpng.so
        name: String,
    },

    /// Print the first candidate found as given or on the script search path
    Locate {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Create a directory and its missing ancestors
    Mkdir { path: String },

    /// Remove files matching one or more masks
    Rm {
        #[arg(required = true)]
        masks: Vec<String>,
    },

    /// Remove a directory and everything below it
    Rmdir { path: String },

    /// Show the host operating system and word size
    Os {
        /// Compare against an OS identifier instead (case-insensitive)
        #[arg(long, value_name = "ID")]
        is: Option<String>,
    },

    /// Generate an identifier, derived from NAME when given
    Uuid { name: Option<String> },
}
