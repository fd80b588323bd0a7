//! Pronunciation audio from the Google Translate speech endpoint.

use std::path::Path;

use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::http_client::HttpClient;

/// Longest text sent in one request, in characters.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Speech synthesizer producing MP3 data.
#[derive(Debug, Clone)]
pub struct GoogleTts {
    http: HttpClient,
    endpoint: String,
    language: String,
    slow: bool,
}

impl GoogleTts {
    pub fn new(
        http: HttpClient,
        endpoint: impl Into<String>,
        language: impl Into<String>,
        slow: bool,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            language: language.into(),
            slow,
        }
    }

    fn chunk_url(&self, chunk: &str) -> Result<Url, FetchError> {
        let speed = if self.slow { "0.3" } else { "1" };
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("ttsspeed", speed),
                ("q", chunk),
            ],
        )?)
    }

    /// Synthesizes `text`, concatenating the MP3 payload of every chunk.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, FetchError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(FetchError::EmptyText);
        }

        let mut audio = Vec::new();
        for chunk in &chunks {
            let bytes = self.http.get(self.chunk_url(chunk)?).await?;
            audio.extend_from_slice(&bytes);
        }
        debug!("Synthesized {} chunks ({} bytes)", chunks.len(), audio.len());
        Ok(audio)
    }

    /// Synthesizes `text` into `dest`, overwriting it.
    pub async fn synthesize_to_file(&self, text: &str, dest: &Path) -> Result<(), FetchError> {
        let audio = self.synthesize(text).await?;
        tokio::fs::write(dest, audio).await?;
        Ok(())
    }
}

/// Splits text on whitespace into chunks of at most `max_chars` characters.
///
/// Words longer than `max_chars` are cut at character boundaries.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tts(server: &MockServer, slow: bool) -> GoogleTts {
        GoogleTts::new(
            HttpClient::builder().build().unwrap(),
            format!("{}/translate_tts", server.uri()),
            "fr",
            slow,
        )
    }

    #[test]
    fn test_split_short_text() {
        assert_eq!(split_text("le chat", 100), vec!["le chat"]);
    }

    #[test]
    fn test_split_empty_text() {
        assert!(split_text("   ", 100).is_empty());
    }

    #[test]
    fn test_split_on_whitespace() {
        assert_eq!(
            split_text("un deux trois quatre", 9),
            vec!["un deux", "trois", "quatre"]
        );
    }

    #[test]
    fn test_split_long_word() {
        assert_eq!(split_text("abcdefg hi", 3), vec!["abc", "def", "g", "hi"]);
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        assert_eq!(split_text("été été", 7), vec!["été été"]);
    }

    #[tokio::test]
    async fn test_synthesize_sends_expected_query() -> Result<(), FetchError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("ie", "UTF-8"))
            .and(query_param("client", "tw-ob"))
            .and(query_param("tl", "fr"))
            .and(query_param("ttsspeed", "1"))
            .and(query_param("q", "le chat"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3data".as_slice()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let audio = tts(&mock_server, false).synthesize("le chat").await?;
        assert_eq!(audio, b"ID3data");
        Ok(())
    }

    #[tokio::test]
    async fn test_slow_speed() -> Result<(), FetchError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("ttsspeed", "0.3"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".as_slice()))
            .expect(1)
            .mount(&mock_server)
            .await;

        tts(&mock_server, true).synthesize("lent").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_long_text_concatenates_chunks() -> Result<(), FetchError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ab".as_slice()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let text = format!("{} {}", "a".repeat(60), "b".repeat(60));
        let audio = tts(&mock_server, false).synthesize(&text).await?;
        assert_eq!(audio, b"abab");
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let mock_server = MockServer::start().await;
        let result = tts(&mock_server, false).synthesize("  ").await;
        assert!(matches!(result, Err(FetchError::EmptyText)));
    }

    #[tokio::test]
    async fn test_synthesize_to_file_overwrites() -> Result<(), FetchError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".as_slice()))
            .mount(&mock_server)
            .await;

        let dir = tempdir()?;
        let dest = dir.path().join("clip.mp3");
        std::fs::write(&dest, b"old")?;

        tts(&mock_server, false).synthesize_to_file("bonjour", &dest).await?;
        assert_eq!(std::fs::read(&dest)?, b"new");
        Ok(())
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_chunks_respect_limit(text in "[a-z ]{0,400}", max in 1usize..120) {
            for chunk in split_text(&text, max) {
                prop_assert!(chunk.chars().count() <= max);
                prop_assert!(!chunk.is_empty());
            }
        }

        #[test]
        fn test_chunks_keep_words(text in "[a-z]{1,10}( [a-z]{1,10}){0,30}") {
            let joined = split_text(&text, 100).join(" ");
            prop_assert_eq!(joined, text);
        }
    }
}
