//! vocadeck CLI
//!
//! Builds Anki vocabulary decks with pronunciation audio.

mod cli;
mod commands;
mod output;
mod remote;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{CacheCommands, Cli, Commands};
use crate::commands::build::{BuildArgs, run_build};
use crate::commands::cache::{run_cache_clean, run_cache_show};
use crate::commands::id::run_id;
use crate::commands::init::run_init;
use crate::commands::translate::run_translate;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_failures) => {
            if has_failures {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Build {
            files,
            sheets,
            all_sheets,
            force,
            shuffle,
            no_audio,
            format,
        } => run_build(
            &cli,
            BuildArgs {
                files,
                sheets,
                all_sheets: *all_sheets,
                force: *force,
                shuffle: *shuffle,
                no_audio: *no_audio,
                format: *format,
            },
        ),
        Commands::Translate { file } => run_translate(&cli, file),
        Commands::Init { force } => run_init(&cli, *force).map(|_| false),
        Commands::Cache { command } => match command {
            CacheCommands::Show => run_cache_show(&cli).map(|_| false),
            CacheCommands::Clean => run_cache_clean(&cli).map(|_| false),
        },
        Commands::Id { text } => {
            run_id(text);
            Ok(false)
        }
    }
}
