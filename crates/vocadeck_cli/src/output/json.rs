//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use vocadeck_core::SourceOutcome;

pub fn output_json(outcomes: &[SourceOutcome]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(outcomes).into_diagnostic()?
    );
    Ok(())
}
