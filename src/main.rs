use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use configuration::init_logging;
use database::CsvLedgerStore;

mod cli;
mod commands;
mod render;

/// The main entry point for the betledger application.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Keep the guard alive until exit so buffered file logs are flushed.
    let _log_guard =
        init_logging(cli.paths.log_dir.as_deref()).context("Failed to initialize logging")?;

    let store = CsvLedgerStore::new(&cli.paths.ledger);

    // Execute the appropriate command
    match cli.command {
        Commands::Add(args) => {
            commands::handle_add(args, &cli.paths, &store)?;
        }
        Commands::List => commands::handle_list(&store, false)?,
        Commands::Open => commands::handle_list(&store, true)?,
        Commands::Settle(args) => {
            commands::handle_settle(args, &store)?;
        }
        Commands::Report(args) => commands::handle_report(args, &store)?,
        Commands::Filters => commands::handle_filters(&store)?,
        Commands::Config(command) => commands::handle_config(command, &cli.paths)?,
        Commands::BackfillUnitValue(args) => {
            commands::handle_backfill(args, &cli.paths, &store)?;
        }
    }

    Ok(())
}
