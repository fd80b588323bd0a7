//! Translate command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;
use vocadeck_core::{load_csv, translate_missing, write_csv};

use super::load_config;
use crate::cli::Cli;
use crate::remote::Remote;

/// Fills missing French cells of `file` and rewrites it.
///
/// Returns whether some translations failed.
pub fn run_translate(cli: &Cli, file: &Path) -> Result<bool> {
    if !file.is_file() {
        return Err(miette::miette!("Input file not found: {}", file.display()));
    }

    let config = load_config(cli)?;
    let mut sheet = load_csv(file).into_diagnostic()?;

    let missing = sheet.missing_translations();
    if missing == 0 {
        println!("All {} entries of {} already have translations", sheet.len(), file.display());
        return Ok(false);
    }

    let remote = Remote::from_config(&config)?;
    let summary = translate_missing(&mut sheet, &remote.translator());

    if summary.translated > 0 {
        write_csv(file, &sheet).into_diagnostic()?;
        info!("Updated {}", file.display());
    }

    println!(
        "Translated {} of {} missing entries in {} ({} failed)",
        summary.translated,
        missing,
        file.display(),
        summary.failed
    );
    Ok(summary.failed > 0)
}
