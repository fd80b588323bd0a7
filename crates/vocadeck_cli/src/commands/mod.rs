//! Subcommand implementations

pub mod build;
pub mod cache;
pub mod id;
pub mod init;
pub mod translate;

use miette::{IntoDiagnostic, Result};
use tracing::info;
use vocadeck_cache::CacheStore;
use vocadeck_core::DeckConfig;

use crate::cli::Cli;

/// Loads `--config`, or the discovered config file, or the defaults.
pub fn load_config(cli: &Cli) -> Result<DeckConfig> {
    if let Some(ref path) = cli.config {
        return DeckConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = DeckConfig::discover(".") {
        info!("Using config: {}", path.display());
        return DeckConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(DeckConfig::new())
}

/// Opens the cache document named by the config, honoring `--no-cache`.
pub fn open_cache(cli: &Cli, config: &DeckConfig) -> CacheStore {
    let mut cache = CacheStore::load(config.cache_file());
    if cli.no_cache || !config.cache {
        cache.disable();
    }
    cache
}
