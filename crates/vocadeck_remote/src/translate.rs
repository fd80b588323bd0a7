//! Translation lookups against the public Google Translate endpoint.

use serde_json::Value;
use url::Url;

use crate::error::FetchError;
use crate::http_client::HttpClient;

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    http: HttpClient,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslator {
    pub fn new(
        http: HttpClient,
        endpoint: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    /// Translates `text` from the source into the target language.
    pub async fn translate(&self, text: &str) -> Result<String, FetchError> {
        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )?;
        let body = self.http.get_text(url).await?;
        parse_response(&body)
    }
}

/// Joins the translated text of every segment.
///
/// The response looks like `[[["chat","cat",null,null,1], ...], null, "en"]`.
fn parse_response(body: &str) -> Result<String, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::InvalidResponse("missing translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(FetchError::InvalidResponse("empty translation".to_string()));
    }
    Ok(translated)
}
