mod agents;
mod cli;
mod config;
mod error;
mod manifest;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use config::Config;
use error::Result;
use std::process;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    let mut config = Config::new(&cli.path, cli.verbose);

    // Installer runs are awaited one at a time, a single thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Update {
                installer,
                no_clean,
                filter,
            } => {
                config.installer_program = installer;
                config.clean = !no_clean;
                config.filter = filter;
                workflow::execute_update(&config).await
            }
            Commands::Sync { check } => workflow::execute_sync(&config, check).await,
            Commands::List { json } => workflow::execute_list(&config, json).await,
        }
    })
}
