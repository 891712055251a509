//! Command handlers.
//!
//! Each handler delegates to the [`Engine`] and renders the result either
//! one item per line or as JSON. Output goes to any `Write` so handlers can
//! be exercised without a terminal.

use std::io::Write;

use forgefs_core::{Engine, RemoveTarget};
use serde::Serialize;

use crate::commands::Commands;
use crate::error::CliError;

/// Host facts printed by `forgefs os`.
#[derive(Debug, Serialize)]
struct HostReport<'a> {
    os: &'a str,
    is_64bit: bool,
}

/// Run one command against `engine`.
pub fn execute(
    engine: &Engine,
    command: &Commands,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::Files { masks } => {
            let found = engine.match_files_in(masks)?;
            print_list(out, &found, json)
        }
        Commands::Dirs { masks } => {
            let found = engine.match_dirs_in(masks)?;
            print_list(out, &found, json)
        }
        Commands::FindLib { name } => {
            let path = engine
                .find_library(name)
                .ok_or_else(|| CliError::NotFound(format!("library '{name}'")))?;
            print_value(out, &path, json)
        }
        Commands::Locate { names } => {
            let path = engine
                .locate(names)
                .ok_or_else(|| CliError::NotFound(format!("'{}'", names.join("', '"))))?;
            print_value(out, &path, json)
        }
        Commands::Mkdir { path } => Ok(engine.make_dirs(path)?),
        Commands::Rm { masks } => Ok(engine.remove_all(RemoveTarget::from(masks.clone()))?),
        Commands::Rmdir { path } => Ok(engine.remove_dir_recursive(path)?),
        Commands::Os { is: Some(id) } => {
            let matches = engine.is(id);
            if json {
                serde_json::to_writer(&mut *out, &matches)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{matches}")?;
            }
            Ok(())
        }
        Commands::Os { is: None } => {
            let report = HostReport {
                os: engine.os_id(),
                is_64bit: engine.is_64bit(),
            };
            if json {
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                let bits = if report.is_64bit { 64 } else { 32 };
                writeln!(out, "{} ({bits}-bit)", report.os)?;
            }
            Ok(())
        }
        Commands::Uuid { name } => {
            let id = engine.generate_uuid(name.as_deref());
            print_value(out, &id.hyphenated().to_string(), json)
        }
    }
}

fn print_list(out: &mut impl Write, items: &[String], json: bool) -> Result<(), CliError> {
    if json {
        serde_json::to_writer(&mut *out, items)?;
        writeln!(out)?;
    } else {
        for item in items {
            writeln!(out, "{item}")?;
        }
    }
    Ok(())
}

fn print_value(out: &mut impl Write, value: &str, json: bool) -> Result<(), CliError> {
    if json {
        serde_json::to_writer(&mut *out, value)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
