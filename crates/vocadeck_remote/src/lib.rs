//! # vocadeck_remote
//!
//! Network collaborators used while building decks: speech synthesis,
//! translation lookups and spreadsheet export.

pub mod error;
pub mod http_client;
pub mod sheets;
pub mod translate;
pub mod tts;

pub use error::FetchError;
pub use http_client::{HttpClient, HttpClientBuilder};
pub use sheets::SheetFetcher;
pub use translate::GoogleTranslator;
pub use tts::GoogleTts;
