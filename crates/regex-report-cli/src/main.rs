//! regex-report CLI - registry pattern consistency report.

mod cli;
mod commands;
mod console;
mod logging;

use std::sync::Arc;

use clap::Parser;
use cli::Cli;
use console::Console;

fn main() {
    let cli = Cli::parse();

    let console = Arc::new(Console::new());
    logging::init(cli.verbose, Arc::clone(&console));

    let result = commands::build::run(cli.single, cli.verbose, &console);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
