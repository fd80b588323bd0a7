//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// vocadeck - Anki vocabulary decks with pronunciation audio
#[derive(Parser)]
#[command(name = "vocadeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable caching
    #[arg(long, global = true)]
    pub no_cache: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build decks from CSV files or spreadsheet sheets
    Build {
        /// CSV files to build (defaults to basic_french.csv)
        files: Vec<PathBuf>,

        /// Spreadsheet sheet to build (repeatable)
        #[arg(long = "sheet", value_name = "NAME")]
        sheets: Vec<String>,

        /// Build every sheet listed in the configuration
        #[arg(long)]
        all_sheets: bool,

        /// Rebuild even when nothing changed
        #[arg(long)]
        force: bool,

        /// Shuffle note order
        #[arg(long)]
        shuffle: bool,

        /// Skip pronunciation audio
        #[arg(long)]
        no_audio: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fill in missing translations of a CSV file
    Translate {
        /// CSV file to update in place
        file: PathBuf,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Inspect or clear the build cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Print the identifiers derived from a text
    Id {
        /// Deck name or vocabulary text
        text: String,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached sources
    Show,
    /// Delete the cache file
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
