// src/fetch/sheets.rs

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::future::Future;
use tracing::debug;
use url::Url;

use crate::config::SheetOptions;
use crate::error::FetchError;

/// Rows of cells as returned by the source. Ragged, possibly empty.
pub type RawGrid = Vec<Vec<String>>;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Anything that can produce the cell grid for a sheet.
pub trait GridSource {
    fn fetch_grid(
        &self,
        options: &SheetOptions,
    ) -> impl Future<Output = Result<RawGrid, FetchError>> + Send;
}

/// Body of `GET .../values/{range}`. `values` is omitted for an empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Cell>>,
}

/// A cell as the API encodes it; anything non-string is rendered to text.
#[derive(Debug)]
struct Cell(String);

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        Ok(Cell(text))
    }
}

/// Read-only client for the spreadsheet values endpoint.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, SHEETS_API_BASE)
    }

    /// Point at another API root (a mock server in tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/{sheet_id}/values/{range}?key={api_key}`, with the range percent-encoded as a path segment.
    pub fn values_url(&self, options: &SheetOptions) -> Result<Url, FetchError> {
        let invalid = |reason: String| FetchError::InvalidUrl {
            sheet_id: options.sheet_id.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(&[options.sheet_id.as_str(), "values", options.range().as_str()]);
        url.query_pairs_mut().append_pair("key", &options.api_key);
        Ok(url)
    }

    pub async fn fetch_values(&self, options: &SheetOptions) -> Result<RawGrid, FetchError> {
        if options.sheet_id.trim().is_empty() {
            return Err(FetchError::MissingSheetId);
        }
        let url = self.values_url(options)?;
        debug!(sheet_id = %options.sheet_id, range = %options.range(), "GET values");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                sheet_id: options.sheet_id.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                sheet_id: options.sheet_id.clone(),
                status,
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body: ValueRange = resp.json().await.map_err(|source| FetchError::Decode {
            sheet_id: options.sheet_id.clone(),
            source,
        })?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(|Cell(text)| text).collect())
            .collect())
    }
}

impl GridSource for SheetsClient {
    fn fetch_grid(
        &self,
        options: &SheetOptions,
    ) -> impl Future<Output = Result<RawGrid, FetchError>> + Send {
        self.fetch_values(options)
    }
}
