//! Single-file JSON summary cache.
//!
//! The whole mapping lives in one pretty-printed JSON object. Every read
//! loads the file from disk; every write rewrites it in full.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheError, SummaryCache};

type Entries = BTreeMap<String, String>;

/// JSON-file-backed summary cache.
///
/// Writers within one process are serialized so a read-modify-write cycle
/// never drops an entry written concurrently. Other processes sharing the
/// file still race (last writer wins).
pub struct JsonFileCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCache {
    /// Create a cache backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, CacheError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw).map_err(|e| {
            CacheError::Corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn store(&self, entries: &Entries) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CacheError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SummaryCache for JsonFileCache {
    async fn get(&self, id: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.load().await?;
        Ok(entries.remove(id))
    }

    async fn put(&self, id: &str, summary: &str) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        entries.insert(id.to_string(), summary.to_string());
        self.store(&entries).await?;

        debug!(
            "Cached summary for {} ({} entries in {})",
            id,
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn len(&self) -> Result<usize, CacheError> {
        Ok(self.load().await?.len())
    }
}
