//! HTTP API client for the Amino server

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use crate::api::{endpoints, types::*};
use crate::error::{CliError, Result};

/// Default timeout for API requests in seconds
///
/// A lookup waits on every upstream source, so this is well above the
/// server's per-source timeout. Override with `AMINO_API_TIMEOUT_SECS`.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Default server URL when neither flag nor environment sets one
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let timeout_secs = std::env::var("AMINO_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Aggregate an identifier without recording it
    pub async fn lookup(&self, identifier: &str) -> Result<ProteinLookup> {
        let url = endpoints::protein_url(&self.base_url, identifier);
        tracing::debug!(url = %url, "Looking up protein");

        let response = self.client.get(&url).send().await?;
        Ok(decode::<ProteinLookup>(response).await?.data)
    }

    /// Aggregate an identifier and record it in the history
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let url = endpoints::searches_url(&self.base_url);
        tracing::debug!(url = %url, query = %query, "Running search");

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest {
                query: query.to_string(),
            })
            .send()
            .await?;
        Ok(decode::<SearchOutcome>(response).await?.data)
    }

    pub async fn history(&self, page: i64, per_page: i64) -> Result<HistoryPage> {
        let url = endpoints::history_url(&self.base_url, page, per_page);

        let response = self.client.get(&url).send().await?;
        let envelope = decode::<Vec<SearchHistoryItem>>(response).await?;

        Ok(HistoryPage {
            items: envelope.data,
            pagination: envelope.meta.and_then(|m| m.pagination),
        })
    }

    pub async fn get_search(&self, id: &Uuid) -> Result<SearchRecord> {
        let url = endpoints::search_url(&self.base_url, id);

        let response = self.client.get(&url).send().await?;
        Ok(decode::<SearchRecord>(response).await?.data)
    }
}

/// Decode a success envelope, or turn an error envelope into [`CliError`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    let detail = serde_json::from_str::<ApiErrorResponse>(&body).ok().map(|e| e.error);
    tracing::debug!(status = status.as_u16(), ?detail, "Server returned an error");

    Err(match (status, detail) {
        (StatusCode::NOT_FOUND, Some(detail)) => CliError::NotFound(detail.message),
        (_, Some(detail)) => CliError::api(detail.code, detail.message),
        (status, None) => CliError::api(
            status.as_u16().to_string(),
            status.canonical_reason().unwrap_or("unexpected status"),
        ),
    })
}
