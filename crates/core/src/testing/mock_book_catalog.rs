//! Mock book catalog for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::book_catalog::{BookCatalog, BookCatalogError, RawVolume, VolumeInfo};

/// A recorded catalog call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogCall {
    Search { query: String },
    FetchById { id: String },
}

/// Mock implementation of the BookCatalog trait.
///
/// Provides controllable behavior for testing:
/// - `search` returns every configured volume, in insertion order,
///   whatever the query (like a scripted upstream page)
/// - `fetch_by_id` returns the matching volume's metadata, or empty
///   metadata for unknown ids, mirroring the real client
/// - Track calls for assertions
/// - Simulate failures
#[derive(Debug, Default)]
pub struct MockBookCatalog {
    volumes: Arc<RwLock<Vec<RawVolume>>>,
    calls: Arc<RwLock<Vec<RecordedCatalogCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<BookCatalogError>>>,
}

impl MockBookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a volume.
    pub async fn add_volume(&self, volume: RawVolume) {
        self.volumes.write().await.push(volume);
    }

    /// Replace all volumes.
    pub async fn set_volumes(&self, volumes: Vec<RawVolume>) {
        *self.volumes.write().await = volumes;
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCatalogCall> {
        self.calls.read().await.clone()
    }

    /// Number of calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: BookCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn record(&self, call: RecordedCatalogCall) {
        self.calls.write().await.push(call);
    }

    async fn take_error(&self) -> Option<BookCatalogError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl BookCatalog for MockBookCatalog {
    async fn search(&self, query: &str) -> Result<Vec<RawVolume>, BookCatalogError> {
        self.record(RecordedCatalogCall::Search {
            query: query.to_string(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.volumes.read().await.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<VolumeInfo, BookCatalogError> {
        self.record(RecordedCatalogCall::FetchById { id: id.to_string() })
            .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .volumes
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.volume_info.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_search_returns_all_volumes_in_order() {
        let catalog = MockBookCatalog::new();
        catalog.add_volume(fixtures::volume("a", "First", "")).await;
        catalog.add_volume(fixtures::volume("b", "Second", "")).await;

        let results = catalog.search("whatever").await.unwrap();
        let ids: Vec<_> = results.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(
            catalog.recorded_calls().await,
            vec![RecordedCatalogCall::Search {
                query: "whatever".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_is_empty() {
        let catalog = MockBookCatalog::new();
        let info = catalog.fetch_by_id("nope").await.unwrap();
        assert!(info.is_empty());
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let catalog = MockBookCatalog::new();
        catalog
            .set_next_error(BookCatalogError::ParseError("boom".to_string()))
            .await;

        assert!(catalog.search("q").await.is_err());
        assert!(catalog.search("q").await.is_ok());
        assert_eq!(catalog.call_count().await, 2);
    }
}
