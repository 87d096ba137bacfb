//! cfgtree CLI
//!
//! Read-only queries against a configuration tree on disk.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run the parsed command. `Ok(false)` exits with status 1 without an
/// error message.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let options = commands::load_options(cli.options.as_deref())?;
    let tree = || commands::open_tree(&cli.root, &options);

    match cli.command {
        Commands::Get { path, json } => commands::run_get(&tree()?, &path, json)?,
        Commands::Exists { path } => return commands::run_exists(&tree()?, &path),
        Commands::Keys { path } => commands::run_keys(&tree()?, path.as_deref())?,
        Commands::Dump { path } => commands::run_dump(&tree()?, path.as_deref())?,
        Commands::Formats => commands::run_formats(&options)?,
    }
    Ok(true)
}
