//! Blocking adapters from the async HTTP collaborators to the generator traits.

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use vocadeck_core::{DeckConfig, SpeechSynthesizer, Translator, VocadeckError};
use vocadeck_remote::{GoogleTranslator, GoogleTts, HttpClient, SheetFetcher};

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Remote services configured from a [`DeckConfig`], sharing one runtime.
pub struct Remote {
    runtime: Runtime,
    translator: GoogleTranslator,
    tts: GoogleTts,
    sheets: SheetFetcher,
}

impl Remote {
    pub fn from_config(config: &DeckConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .into_diagnostic()?;

        Ok(Self {
            runtime: create_tokio_runtime()?,
            translator: GoogleTranslator::new(
                http.clone(),
                &config.translate_url,
                &config.source_lang,
                &config.target_lang,
            ),
            tts: GoogleTts::new(http.clone(), &config.tts_url, &config.language, config.slow),
            sheets: SheetFetcher::new(http, &config.sheets_url),
        })
    }

    pub fn translator(&self) -> BlockingTranslator<'_> {
        BlockingTranslator { remote: self }
    }

    pub fn speech(&self) -> BlockingSpeech<'_> {
        BlockingSpeech { remote: self }
    }

    /// Downloads one spreadsheet sheet as CSV text.
    pub fn fetch_sheet(&self, spreadsheet_id: &str, sheet: &str) -> Result<String, VocadeckError> {
        self.runtime
            .block_on(self.sheets.fetch_csv(spreadsheet_id, sheet))
            .map_err(|e| {
                VocadeckError::invalid_source(format!("sheet '{}'", sheet), e.to_string())
            })
    }
}

pub struct BlockingTranslator<'a> {
    remote: &'a Remote,
}

impl Translator for BlockingTranslator<'_> {
    fn translate(&self, text: &str) -> Result<String, VocadeckError> {
        self.remote
            .runtime
            .block_on(self.remote.translator.translate(text))
            .map_err(|e| VocadeckError::translation(e.to_string()))
    }
}

pub struct BlockingSpeech<'a> {
    remote: &'a Remote,
}

impl SpeechSynthesizer for BlockingSpeech<'_> {
    fn synthesize(&self, text: &str, dest: &Path) -> Result<(), VocadeckError> {
        self.remote
            .runtime
            .block_on(self.remote.tts.synthesize_to_file(text, dest))
            .map_err(|e| VocadeckError::speech(e.to_string()))
    }
}
