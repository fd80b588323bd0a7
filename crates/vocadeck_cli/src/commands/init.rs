//! Init command implementation

use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::info;
use vocadeck_core::DeckConfig;

use crate::cli::Cli;

/// Writes a default config to `--config`, or to the discovered config file,
/// or to `.vocadeck.json` in the working directory.
pub fn run_init(cli: &Cli, force: bool) -> Result<()> {
    let target = cli
        .config
        .clone()
        .or_else(|| DeckConfig::discover("."))
        .unwrap_or_else(|| PathBuf::from(DeckConfig::CONFIG_FILES[0]));

    write_default_config(&target, force)?;
    info!("Created {}", target.display());
    println!("Created {}", target.display());
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(miette::miette!(
            "{} already exists. Run `vocadeck init --force` to overwrite it.",
            path.display()
        ));
    }

    let mut content = DeckConfig::new().to_json_pretty().into_diagnostic()?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(path, content).into_diagnostic()
}
