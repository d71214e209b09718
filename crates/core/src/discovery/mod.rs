//! Book discovery - search with content labels, and cached teasers.
//!
//! Composes the catalog client, the label dictionaries, the teaser
//! generator and the summary cache. Holds no per-request state apart from
//! the in-flight lock table used to collapse concurrent cache misses.

mod in_flight;
mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::book_catalog::{BookCatalog, BookCatalogError};
use crate::classifier::book_text;
use crate::labels::LabelDictionaries;
use crate::llm::LlmError;
use crate::metrics::{
    observe_external_call, CACHE_LOOKUPS, SEARCH_RESULTS, TEASERS_GENERATED,
};
use crate::summary_cache::{CacheError, SummaryCache};
use crate::teaser::{TeaserGenerator, TEASER_THEMES};

use in_flight::InFlight;

/// Title used in the teaser prompt when the catalog has none.
pub const FALLBACK_TEASER_TITLE: &str = "This book";

/// Errors surfaced by discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Rejected before any outbound call.
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Catalog(#[from] BookCatalogError),

    #[error("Teaser generation failed: {0}")]
    Teaser(#[from] LlmError),

    #[error("Summary cache failed: {0}")]
    Cache(#[from] CacheError),
}

/// Search and summarize operations over one catalog and one cache.
pub struct Discovery {
    catalog: Arc<dyn BookCatalog>,
    labels: Arc<LabelDictionaries>,
    teasers: TeaserGenerator,
    cache: Arc<dyn SummaryCache>,
    in_flight: InFlight,
}

impl Discovery {
    pub fn new(
        catalog: Arc<dyn BookCatalog>,
        labels: Arc<LabelDictionaries>,
        teasers: TeaserGenerator,
        cache: Arc<dyn SummaryCache>,
    ) -> Self {
        Self {
            catalog,
            labels,
            teasers,
            cache,
            in_flight: InFlight::default(),
        }
    }

    pub fn labels(&self) -> &LabelDictionaries {
        &self.labels
    }

    pub fn cache(&self) -> &Arc<dyn SummaryCache> {
        &self.cache
    }

    /// Search the catalog and label every result.
    ///
    /// Results keep the catalog's order.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, DiscoveryError> {
        if query.is_empty() {
            return Err(DiscoveryError::InvalidInput(
                "query parameter 'q' must not be empty".to_string(),
            ));
        }

        let started = Instant::now();
        let volumes = self.catalog.search(query).await;
        observe_external_call("catalog", "search", started, volumes.is_ok());
        let volumes = volumes?;

        SEARCH_RESULTS
            .with_label_values(&[])
            .observe(volumes.len() as f64);
        debug!("Search '{}' returned {} volumes", query, volumes.len());

        Ok(volumes
            .into_iter()
            .map(|volume| SearchResult::from_volume(volume, &self.labels))
            .collect())
    }

    /// Return the teaser for a volume, generating and caching it on a miss.
    ///
    /// A hit makes no outbound calls. Concurrent misses for the same id
    /// wait for each other, so only the first one reaches the catalog and
    /// the model; failed generations are not cached.
    pub async fn summarize(&self, id: &str) -> Result<String, DiscoveryError> {
        if id.is_empty() {
            return Err(DiscoveryError::InvalidInput(
                "query parameter 'id' must not be empty".to_string(),
            ));
        }

        if let Some(summary) = self.cache.get(id).await? {
            CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            info!("Summary cache hit for {}", id);
            return Ok(summary);
        }
        CACHE_LOOKUPS.with_label_values(&["miss"]).inc();

        let _in_flight = self.in_flight.lock(id).await;
        self.summarize_miss(id).await
    }

    async fn summarize_miss(&self, id: &str) -> Result<String, DiscoveryError> {
        // Another request may have filled the entry while we waited
        if let Some(summary) = self.cache.get(id).await? {
            debug!("Summary for {} was generated by a concurrent request", id);
            return Ok(summary);
        }

        info!("Summary cache miss for {}, generating", id);

        let started = Instant::now();
        let info = self.catalog.fetch_by_id(id).await;
        observe_external_call("catalog", "fetch_by_id", started, info.is_ok());
        let info = info?;

        if info.is_empty() {
            warn!("Catalog returned no metadata for {}", id);
        }

        let title = info.title.as_deref().unwrap_or(FALLBACK_TEASER_TITLE);
        let text = book_text(title, info.description_or_empty());
        let mut themes = self.labels.classify_themes(&text);
        themes.truncate(TEASER_THEMES);

        let started = Instant::now();
        let teaser = self.teasers.generate(title, &themes).await;
        observe_external_call("llm", "complete", started, teaser.is_ok());
        let teaser = teaser?;

        self.cache.put(id, &teaser).await?;
        TEASERS_GENERATED.inc();

        Ok(teaser)
    }
}
