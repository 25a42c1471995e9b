//! nutassets CLI
//!
//! Resolves projects, manifests and the app-selector list of a nut
//! application laid out on disk.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        match e.code() {
            Some(code) => eprintln!("{} [{}]: {}", "error".red().bold(), code, e),
            None => eprintln!("{}: {}", "error".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let project = cli.project.as_deref();
    match cli.command {
        Commands::Classify { path } => commands::run_classify(&path),
        Commands::Project { file, contents } => {
            commands::run_project(&cli.root, project, file.as_deref(), contents)
        }
        Commands::Manifest { file } => commands::run_manifest(&cli.root, project, file.as_deref()),
        Commands::Apps => commands::run_apps(&cli.root),
    }
}
