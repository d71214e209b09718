//! Summary cache - previously generated teasers keyed by catalog volume id.
//!
//! Entries are created on the first successful generation for an id and
//! are never expired or evicted.

mod json_file;

pub use json_file::JsonFileCache;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading or writing the summary cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache file is corrupt: {0}")]
    Corrupt(String),
}

/// Trait for summary cache storage.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Look up the teaser stored for `id`.
    async fn get(&self, id: &str) -> Result<Option<String>, CacheError>;

    /// Insert or overwrite the teaser for `id`.
    async fn put(&self, id: &str, summary: &str) -> Result<(), CacheError>;

    /// Number of cached entries.
    async fn len(&self) -> Result<usize, CacheError>;
}
