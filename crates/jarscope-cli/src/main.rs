//! Jarscope CLI - Command-line navigator for nested archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Locate(args) => commands::locate::execute(args, &*formatter),
        cli::Commands::Export(args) => {
            commands::export::execute(args, &*formatter, cli.quiet || cli.json)
        }
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
