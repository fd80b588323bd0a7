//! Shared HTTP client.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("vocadeck/", env!("CARGO_PKG_VERSION"));

/// HTTP client with status handling shared by every collaborator.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

/// Builder for HttpClient.
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new builder for HttpClient.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// GET `url` and return the body.
    ///
    /// 404 becomes [`FetchError::NotFound`]; other non-success statuses
    /// become [`FetchError::HttpError`].
    pub async fn get(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url.path());
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::HttpError(status));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// GET `url` and decode the body as UTF-8.
    pub async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let bytes = self.get(url).await?;
        String::from_utf8(bytes).map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

impl HttpClientBuilder {
    /// Set timeout for HTTP requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the HttpClient.
    pub fn build(self) -> Result<HttpClient, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| FetchError::ClientBuildError(e.to_string()))?;
        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_success() -> Result<(), FetchError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/data", mock_server.uri()))?;
        assert_eq!(client().get_text(url).await?, "hello");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();
        match client().get(url).await {
            Err(FetchError::NotFound(_)) => {}
            res => panic!("Expected NotFound, got {:?}", res),
        }
    }

    #[tokio::test]
    async fn test_get_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri()).unwrap();
        match client().get(url).await {
            Err(FetchError::HttpError(status)) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
            }
            res => panic!("Expected HttpError, got {:?}", res),
        }
    }

    #[tokio::test]
    async fn test_get_text_rejects_invalid_utf8() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe]))
            .mount(&mock_server)
            .await;

        let url = Url::parse(&mock_server.uri()).unwrap();
        assert!(matches!(
            client().get_text(url).await,
            Err(FetchError::InvalidResponse(_))
        ));
    }
}
