// tally/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    // RUST_LOG=debug tally report ... to see every query and its timing.
    // Logs go to stderr so stdout only carries result tables.
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        // --- USE CASE: AD-HOC QUERY ---
        Commands::Query { query, limit, db } => {
            commands::query::execute(&cli.project_dir, query, limit, &db)?;
        }

        // --- USE CASE: REPORT ---
        Commands::Report {
            file,
            only,
            list,
            db,
        } => {
            commands::report::execute(&cli.project_dir, file, only, list, &db)?;
        }
    }

    Ok(())
}
