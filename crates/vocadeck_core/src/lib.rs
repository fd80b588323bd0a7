//! # vocadeck_core
//!
//! Deck generation engine for vocadeck.
//!
//! This crate provides:
//! - Stable identifiers for decks and audio clips
//! - Vocabulary sources and their fingerprints
//! - Configuration loading
//! - Deck packaging and the change-aware build loop

pub mod config;
pub mod deck;
mod error;
pub mod generator;
pub mod identity;
pub mod runner;
pub mod source;
pub mod speech;
pub mod text;
pub mod vocab;

pub use config::{DeckConfig, GenerationSettings, SpreadsheetConfig};
pub use error::VocadeckError;
pub use generator::{
    DeckGenerator, GenerationReport, GeneratorOptions, TranslationSummary, translate_missing,
};
pub use identity::{Fingerprint, IDENTITY_SCHEME, StableId, audio_filename, deck_id, derive};
pub use runner::{BuildRunner, SourceOutcome};
pub use source::{load_csv, write_csv};
pub use speech::{NoTranslator, SpeechSynthesizer, Translator};
pub use vocab::{VocabEntry, VocabSheet};
