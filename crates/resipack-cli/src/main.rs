mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error};

fn main() {
    if let Err(e) = run_app() {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
    debug!(?cli, "Parsed command line.");

    match cli.command {
        Commands::Pack(args) => commands::pack::run(args),
        Commands::Score(args) => commands::score::run(args),
        Commands::Canonical(args) => commands::canonical::run(args),
    }
}
