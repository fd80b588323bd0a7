//! Build command implementation

use std::path::{Path, PathBuf};

use miette::Result;
use vocadeck_core::text::deck_name_from_path;
use vocadeck_core::{
    BuildRunner, DeckConfig, DeckGenerator, GeneratorOptions, VocabSheet, load_csv,
};

use super::{load_config, open_cache};
use crate::cli::{Cli, OutputFormat};
use crate::output::output_outcomes;
use crate::remote::Remote;

/// Input used when neither files nor sheets are given.
pub const DEFAULT_INPUT: &str = "basic_french.csv";

pub struct BuildArgs<'a> {
    pub files: &'a [PathBuf],
    pub sheets: &'a [String],
    pub all_sheets: bool,
    pub force: bool,
    pub shuffle: bool,
    pub no_audio: bool,
    pub format: OutputFormat,
}

pub fn run_build(cli: &Cli, args: BuildArgs<'_>) -> Result<bool> {
    let mut config = load_config(cli)?;
    if args.shuffle {
        config.shuffle = true;
    }
    if args.no_audio {
        config.audio = false;
    }

    let files = input_files(&args);
    for file in &files {
        if !file.is_file() {
            return Err(miette::miette!("Input file not found: {}", file.display()));
        }
    }
    let sheets = sheet_names(&config, &args)?;

    let remote = Remote::from_config(&config)?;
    let generator = DeckGenerator::new(
        remote.translator(),
        remote.speech(),
        GeneratorOptions {
            audio_dir: config.audio_dir(),
            audio: config.audio,
            shuffle: config.shuffle,
        },
    );
    let mut runner = BuildRunner::new(
        generator,
        open_cache(cli, &config),
        config.generation_settings(),
        config.output_dir(),
    )
    .force(args.force);

    let mut outcomes = Vec::with_capacity(files.len() + sheets.len());

    for file in &files {
        let source_name = source_name_of(file);
        let deck_name = deck_name_from_path(file);
        outcomes.push(runner.build_loaded(&source_name, &deck_name, load_csv(file)));
    }

    if let Some(spreadsheet) = &config.spreadsheet {
        for sheet in &sheets {
            let origin = format!("{}/{}", spreadsheet.id, sheet);
            let loaded = remote
                .fetch_sheet(&spreadsheet.id, sheet)
                .and_then(|text| VocabSheet::from_csv_str(sheet.as_str(), &text, origin));
            outcomes.push(runner.build_loaded(sheet, sheet, loaded));
        }
    }

    output_outcomes(&outcomes, args.format)
}

fn input_files(args: &BuildArgs<'_>) -> Vec<PathBuf> {
    if args.files.is_empty() && args.sheets.is_empty() && !args.all_sheets {
        vec![PathBuf::from(DEFAULT_INPUT)]
    } else {
        args.files.to_vec()
    }
}

fn sheet_names(config: &DeckConfig, args: &BuildArgs<'_>) -> Result<Vec<String>> {
    if args.sheets.is_empty() && !args.all_sheets {
        return Ok(Vec::new());
    }

    let Some(spreadsheet) = &config.spreadsheet else {
        return Err(miette::miette!(
            "No spreadsheet configured. Add a \"spreadsheet\" section to {}",
            DeckConfig::CONFIG_FILES[0]
        ));
    };

    let mut names = args.sheets.to_vec();
    if args.all_sheets {
        if spreadsheet.sheets.is_empty() {
            return Err(miette::miette!(
                "--all-sheets given but the spreadsheet lists no sheets"
            ));
        }
        for name in &spreadsheet.sheets {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    Ok(names)
}

fn source_name_of(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string())
}
