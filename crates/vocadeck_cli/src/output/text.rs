//! Text output formatter

use vocadeck_core::SourceOutcome;

pub fn output_text(outcomes: &[SourceOutcome]) {
    for outcome in outcomes {
        match outcome {
            SourceOutcome::Skipped {
                source_name,
                output_path,
            } => {
                println!(
                    "{}: up to date ({})",
                    source_name,
                    output_path.display()
                );
            }
            SourceOutcome::Generated {
                source_name,
                status,
                report,
                cache_warning,
            } => {
                println!(
                    "{}: built {} ({} notes, {} translated, {} audio clips) [{}]",
                    source_name,
                    report.output_path.display(),
                    report.notes,
                    report.translated,
                    report.audio_generated,
                    status
                );
                if report.translation_failed > 0 {
                    println!(
                        "  {} translations failed and fell back to English; this source is rebuilt on the next run",
                        report.translation_failed
                    );
                }
                if report.audio_failed > 0 {
                    println!(
                        "  {} audio clips failed; this source is rebuilt on the next run",
                        report.audio_failed
                    );
                }
                if let Some(warning) = cache_warning {
                    println!("  cache not saved: {}", warning);
                }
            }
            SourceOutcome::Failed { source_name, error } => {
                println!("{}: failed: {}", source_name, error);
            }
        }
    }

    let built = outcomes
        .iter()
        .filter(|o| matches!(o, SourceOutcome::Generated { .. }))
        .count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, SourceOutcome::Skipped { .. }))
        .count();
    let failed = outcomes.iter().filter(|o| o.is_failure()).count();

    println!();
    println!(
        "Built {} decks, {} up to date, {} failed",
        built, skipped, failed
    );
}
