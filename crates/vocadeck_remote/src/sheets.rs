//! CSV export of publicly shared spreadsheets.

use tracing::info;
use url::Url;

use crate::error::FetchError;
use crate::http_client::HttpClient;

#[derive(Debug, Clone)]
pub struct SheetFetcher {
    http: HttpClient,
    base_url: String,
}

impl SheetFetcher {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Builds `<base>/<id>/gviz/tq?tqx=out:csv&sheet=<name>`.
    pub fn export_url(&self, spreadsheet_id: &str, sheet: &str) -> Result<Url, FetchError> {
        let base = format!(
            "{}/{}/gviz/tq",
            self.base_url.trim_end_matches('/'),
            spreadsheet_id
        );
        Ok(Url::parse_with_params(
            &base,
            &[("tqx", "out:csv"), ("sheet", sheet)],
        )?)
    }

    /// Downloads one sheet as CSV text.
    pub async fn fetch_csv(&self, spreadsheet_id: &str, sheet: &str) -> Result<String, FetchError> {
        let url = self.export_url(spreadsheet_id, sheet)?;
        let text = self.http.get_text(url).await?;
        info!("Fetched sheet '{}' ({} bytes)", sheet, text.len());
        Ok(text)
    }
}
