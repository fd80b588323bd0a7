//! Output formatting module

mod json;
mod text;

use miette::Result;
use vocadeck_core::SourceOutcome;

use crate::cli::OutputFormat;

/// Prints the outcomes and returns whether any source failed.
pub fn output_outcomes(outcomes: &[SourceOutcome], format: OutputFormat) -> Result<bool> {
    let has_failures = outcomes.iter().any(SourceOutcome::is_failure);

    match format {
        OutputFormat::Json => json::output_json(outcomes)?,
        OutputFormat::Text => text::output_text(outcomes),
    }

    Ok(has_failures)
}
