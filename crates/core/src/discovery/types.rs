//! Types returned by discovery operations.

use serde::{Deserialize, Serialize};

use crate::book_catalog::RawVolume;
use crate::classifier::book_text;
use crate::labels::LabelDictionaries;

/// Title used in search results when the catalog has none.
pub const FALLBACK_SEARCH_TITLE: &str = "Unknown Title";

/// One labelled book in a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    /// Contributors joined with ", " (possibly empty).
    pub author: String,
    /// Catalog description (possibly empty).
    pub synopsis: String,
    /// Thumbnail URL (possibly empty).
    pub cover_url: String,
    pub triggers: Vec<String>,
    pub themes: Vec<String>,
}

impl SearchResult {
    /// Build a result from a catalog volume, labelling it from title and description.
    pub fn from_volume(volume: RawVolume, labels: &LabelDictionaries) -> Self {
        let info = volume.volume_info;
        let title = info
            .title
            .clone()
            .unwrap_or_else(|| FALLBACK_SEARCH_TITLE.to_string());
        let synopsis = info.description_or_empty().to_string();
        let text = book_text(&title, &synopsis);

        Self {
            id: volume.id,
            author: info.author_line(),
            cover_url: info.thumbnail().to_string(),
            triggers: labels.classify_triggers(&text),
            themes: labels.classify_themes(&text),
            title,
            synopsis,
        }
    }
}

/// Response body of a summarize request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub summary: String,
}
