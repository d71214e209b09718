//! Google Books API client.
//!
//! The API key is optional; anonymous requests work with a lower quota.
//! Errors are reported in the body as `{"error": {"code", "message"}}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use super::types::{RawVolume, VolumeInfo};
use super::{BookCatalog, BookCatalogError};
use crate::config::CatalogConfig;

/// Google Books API client.
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_results: u32,
}

impl GoogleBooksClient {
    /// Create a new Google Books client.
    pub fn new(config: CatalogConfig) -> Result<Self, BookCatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.filter(|k| !k.is_empty()),
            max_results: config.max_results,
        })
    }

    fn key_param(&self) -> Vec<(&'static str, String)> {
        self.api_key
            .iter()
            .map(|key| ("key", key.clone()))
            .collect()
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksClient {
    async fn search(&self, query: &str) -> Result<Vec<RawVolume>, BookCatalogError> {
        let url = format!("{}/volumes", self.base_url);

        debug!(
            "Google Books search: query='{}', max_results={}",
            query, self.max_results
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("maxResults", self.max_results.to_string()),
            ])
            .query(&self.key_param())
            .send()
            .await?;

        let body: VolumesResponse = read_body(response, "search").await?;
        if let Some(error) = body.error {
            return Err(error.into());
        }

        debug!("Google Books returned {} volumes", body.items.len());
        Ok(body.items)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<VolumeInfo, BookCatalogError> {
        let url = format!("{}/volumes/{}", self.base_url, urlencoding::encode(id));

        debug!("Google Books get volume: id={}", id);

        let response = self
            .client
            .get(&url)
            .query(&self.key_param())
            .send()
            .await?;

        let body: VolumeResponse = read_body(response, "volume").await?;
        if let Some(error) = body.error {
            warn!(
                "Google Books lookup for {} failed ({}), continuing with empty metadata",
                id, error.message.as_deref().unwrap_or("no message")
            );
        }

        Ok(body.volume_info.unwrap_or_default())
    }
}

/// Parse a JSON body. Error payloads arrive with non-success statuses, so
/// the status alone does not decide; a non-JSON body on a failed request
/// is reported with its status.
async fn read_body<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, BookCatalogError> {
    let status = response.status();
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        if status.is_success() {
            BookCatalogError::ParseError(format!("Failed to parse {} response: {}", what, e))
        } else {
            BookCatalogError::ApiError {
                status: status.as_u16(),
                message: text,
            }
        }
    })
}

// ============================================================================
// Google Books API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<RawVolume>,
    #[serde(default)]
    error: Option<GoogleApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeResponse {
    #[serde(default)]
    volume_info: Option<VolumeInfo>,
    #[serde(default)]
    error: Option<GoogleApiError>,
}

#[derive(Debug, Deserialize)]
struct GoogleApiError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

impl From<GoogleApiError> for BookCatalogError {
    fn from(e: GoogleApiError) -> Self {
        let status = e.code.unwrap_or(502);
        BookCatalogError::ApiError {
            status,
            message: e
                .message
                .unwrap_or_else(|| format!("Catalog returned error status {}", status)),
        }
    }
}
