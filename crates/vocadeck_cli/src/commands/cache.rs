//! Cache command implementation

use miette::{IntoDiagnostic, Result};
use tracing::info;
use vocadeck_cache::CacheStore;

use super::load_config;
use crate::cli::Cli;

pub fn run_cache_show(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let path = config.cache_file();
    let store = CacheStore::try_load(&path).into_diagnostic()?;

    if store.is_empty() {
        println!("No cached sources in {}", path.display());
        return Ok(());
    }

    println!("{} cached sources in {}:", store.len(), path.display());
    for entry in store.entries() {
        let short = entry.fingerprint.get(..12).unwrap_or(&entry.fingerprint);
        let present = if entry.output_path().is_file() {
            ""
        } else {
            " (missing)"
        };
        println!(
            "  {:<24} {}  {}{}",
            entry.source_name,
            short,
            entry.output_path().display(),
            present
        );
    }
    Ok(())
}

pub fn run_cache_clean(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let mut store = CacheStore::new(config.cache_file());

    if store.delete().into_diagnostic()? {
        info!("Removed {}", store.path().display());
    } else {
        info!("No cache file at {}", store.path().display());
    }
    Ok(())
}
