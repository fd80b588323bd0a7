//! Turns a vocabulary sheet into a deck package.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::VocadeckError;
use crate::deck::{NoteFields, write_package};
use crate::identity::{audio_filename, deck_id};
use crate::speech::{SpeechSynthesizer, Translator};
use crate::text::clean_for_speech;
use crate::vocab::VocabSheet;

/// Knobs for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Directory receiving audio clips.
    pub audio_dir: PathBuf,
    /// Whether to synthesize audio at all.
    pub audio: bool,
    /// Shuffle note order in the package.
    pub shuffle: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("audio"),
            audio: true,
            shuffle: false,
        }
    }
}

/// Summary of one generated deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub deck_name: String,
    pub deck_id: i64,
    pub output_path: PathBuf,
    /// Number of notes in the package.
    pub notes: usize,
    /// Entries whose back text came from the translator.
    pub translated: usize,
    /// Entries that fell back to the English text.
    pub translation_failed: usize,
    pub audio_generated: usize,
    pub audio_failed: usize,
}

impl GenerationReport {
    /// True when every missing translation and every requested clip was
    /// produced. Incomplete decks are rebuilt on the next run.
    pub fn is_complete(&self) -> bool {
        self.translation_failed == 0 && self.audio_failed == 0
    }
}

/// Counts from filling a sheet's missing translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationSummary {
    pub translated: usize,
    pub failed: usize,
}

/// Fills in missing back text in place.
///
/// Entries the translator cannot handle keep their empty back text.
pub fn translate_missing<T: Translator>(sheet: &mut VocabSheet, translator: &T) -> TranslationSummary {
    let mut summary = TranslationSummary::default();
    for entry in sheet.entries.iter_mut().filter(|e| !e.has_translation()) {
        match translator.translate(&entry.english) {
            Ok(french) if !french.trim().is_empty() => {
                debug!("Translated '{}' -> '{}'", entry.english, french);
                entry.french = french.trim().to_string();
                summary.translated += 1;
            }
            Ok(_) => {
                warn!("Empty translation for '{}'", entry.english);
                summary.failed += 1;
            }
            Err(e) => {
                warn!("Failed to translate '{}': {}", entry.english, e);
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Builds decks from sheets using the given collaborators.
pub struct DeckGenerator<T, S> {
    translator: T,
    speech: S,
    options: GeneratorOptions,
}

impl<T: Translator, S: SpeechSynthesizer> DeckGenerator<T, S> {
    pub fn new(translator: T, speech: S, options: GeneratorOptions) -> Self {
        Self {
            translator,
            speech,
            options,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn back_text(&self, english: &str, french: &str, counts: &mut TranslationSummary) -> String {
        if !french.trim().is_empty() {
            return french.to_string();
        }
        match self.translator.translate(english) {
            Ok(text) if !text.trim().is_empty() => {
                counts.translated += 1;
                text.trim().to_string()
            }
            Ok(_) => {
                warn!("Empty translation for '{}', using the English text", english);
                counts.failed += 1;
                english.to_string()
            }
            Err(e) => {
                warn!("Translation failed for '{}': {}. Using the English text", english, e);
                counts.failed += 1;
                english.to_string()
            }
        }
    }

    /// Generates `output_path` from `sheet` under the display name `deck_name`.
    pub fn generate(
        &self,
        sheet: &VocabSheet,
        deck_name: &str,
        output_path: &Path,
    ) -> Result<GenerationReport, VocadeckError> {
        if self.options.audio {
            fs::create_dir_all(&self.options.audio_dir)?;
        }

        let mut translations = TranslationSummary::default();
        let mut audio_generated = 0;
        let mut audio_failed = 0;
        let mut notes = Vec::with_capacity(sheet.len());
        let mut media = Vec::new();
        let mut seen_media = HashSet::new();

        for entry in &sheet.entries {
            let french = self.back_text(&entry.english, &entry.french, &mut translations);

            let mut audio = None;
            if self.options.audio {
                let spoken = clean_for_speech(&french);
                let file_name = audio_filename(&entry.english);
                let dest = self.options.audio_dir.join(&file_name);

                if spoken.is_empty() {
                    debug!("Nothing to pronounce for '{}'", entry.english);
                } else {
                    match self.speech.synthesize(&spoken, &dest) {
                        Ok(()) => {
                            audio_generated += 1;
                            if seen_media.insert(file_name.clone()) {
                                media.push(dest);
                            }
                            audio = Some(file_name);
                        }
                        Err(e) => {
                            warn!("Audio failed for '{}': {}", entry.english, e);
                            audio_failed += 1;
                        }
                    }
                }
            }

            notes.push(NoteFields {
                english: entry.english.clone(),
                french,
                audio,
                reversed: entry.reversed,
            });
        }

        if self.options.shuffle {
            notes.shuffle(&mut rand::thread_rng());
        }

        let id = deck_id(deck_name);
        write_package(id, deck_name, &notes, &media, output_path)?;

        info!(
            "Created {} with {} notes ({} new translations, {} clips)",
            output_path.display(),
            notes.len(),
            translations.translated,
            audio_generated
        );

        Ok(GenerationReport {
            deck_name: deck_name.to_string(),
            deck_id: id,
            output_path: output_path.to_path_buf(),
            notes: notes.len(),
            translated: translations.translated,
            translation_failed: translations.failed,
            audio_generated,
            audio_failed,
        })
    }
}
