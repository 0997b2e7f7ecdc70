mod classifier;
mod cli;
mod error;
mod matcher;
mod models;
mod section;
mod settings;
mod source;
mod tracker;
mod workbook;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Refresh { month, year, yes } => cli::refresh::run(month, year, yes),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(if e.is_expected() { 1 } else { 2 });
    }
}
