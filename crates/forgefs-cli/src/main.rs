//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, installs logging, composes the engine
//! through bootstrap and dispatches to the handlers.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use forgefs_cli::{Cli, CliError, bootstrap, handlers, init_tracing};

fn run(cli: &Cli) -> anyhow::Result<()> {
    let engine = bootstrap(cli)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handlers::execute(&engine, &cli.command, cli.json, &mut out)?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            // Not-found is reported through the exit code alone
            if !matches!(err.downcast_ref::<CliError>(), Some(CliError::NotFound(_))) {
                eprintln!("error: {err:#}");
            }
            ExitCode::from(code)
        }
    }
}
