//! Book catalog integration (Google Books).
//!
//! Search by free-text query and lookup by volume id. Only the first page
//! of search results is ever requested.

mod google_books;
mod types;

pub use google_books::GoogleBooksClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the book catalog.
#[derive(Debug, Error)]
pub enum BookCatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The catalog answered with an error payload or a non-success status.
    #[error("{message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for book catalog clients.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Search for volumes matching `query` (first page only).
    async fn search(&self, query: &str) -> Result<Vec<RawVolume>, BookCatalogError>;

    /// Fetch the metadata of one volume.
    ///
    /// A volume the catalog does not know yields an empty [`VolumeInfo`],
    /// not an error.
    async fn fetch_by_id(&self, id: &str) -> Result<VolumeInfo, BookCatalogError>;
}
