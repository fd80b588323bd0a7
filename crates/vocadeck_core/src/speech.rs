//! Collaborators that reach outside the process.
//!
//! The generator only talks to these traits. The binary plugs in network
//! implementations; tests use in-memory ones.

use std::path::Path;

use crate::VocadeckError;

/// Looks up translations for front text.
pub trait Translator {
    /// Translates `text` into the configured target language.
    fn translate(&self, text: &str) -> Result<String, VocadeckError>;
}

/// Turns text into pronunciation audio.
pub trait SpeechSynthesizer {
    /// Synthesizes `text` and writes the clip to `dest`, overwriting it.
    fn synthesize(&self, text: &str, dest: &Path) -> Result<(), VocadeckError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str) -> Result<String, VocadeckError> {
        (**self).translate(text)
    }
}

impl<T: SpeechSynthesizer + ?Sized> SpeechSynthesizer for &T {
    fn synthesize(&self, text: &str, dest: &Path) -> Result<(), VocadeckError> {
        (**self).synthesize(text, dest)
    }
}

/// Translator used when lookups are disabled. Always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslator;

impl Translator for NoTranslator {
    fn translate(&self, _text: &str) -> Result<String, VocadeckError> {
        Err(VocadeckError::translation("translation is disabled"))
    }
}
