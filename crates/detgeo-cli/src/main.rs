mod cli;
mod commands;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::debug;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;
    debug!("Full CLI arguments parsed: {:?}", &cli);

    match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Digitize(args) => commands::digitize::run(args),
    }
}
