//! Types for book catalog API responses.

use serde::{Deserialize, Serialize};

/// One volume from a catalog search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawVolume {
    /// Catalog volume id.
    #[serde(default)]
    pub id: String,
    /// Bibliographic metadata.
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Bibliographic metadata of a volume. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
}

impl VolumeInfo {
    /// Contributors joined with ", " (empty when there are none).
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Description, or an empty string.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Thumbnail cover URL, or an empty string.
    pub fn thumbnail(&self) -> &str {
        self.image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref())
            .unwrap_or("")
    }

    /// Whether the catalog returned nothing usable for this volume.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.authors.is_empty()
    }
}

/// Cover image links.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_info_accessors() {
        let info = VolumeInfo {
            title: Some("Example Novel".to_string()),
            authors: vec!["Ann Author".to_string(), "Bo Writer".to_string()],
            description: None,
            image_links: Some(ImageLinks {
                small_thumbnail: None,
                thumbnail: Some("http://covers/1.jpg".to_string()),
            }),
        };

        assert_eq!(info.author_line(), "Ann Author, Bo Writer");
        assert_eq!(info.description_or_empty(), "");
        assert_eq!(info.thumbnail(), "http://covers/1.jpg");
        assert!(!info.is_empty());
    }

    #[test]
    fn test_empty_volume_info() {
        let info = VolumeInfo::default();
        assert_eq!(info.author_line(), "");
        assert_eq!(info.thumbnail(), "");
        assert!(info.is_empty());
    }

    #[test]
    fn test_deserialize_partial_volume() {
        let json = r#"{"id": "zyTCAlFPjgYC", "volumeInfo": {"title": "The Google Story"}}"#;
        let volume: RawVolume = serde_json::from_str(json).unwrap();
        assert_eq!(volume.id, "zyTCAlFPjgYC");
        assert_eq!(volume.volume_info.title.as_deref(), Some("The Google Story"));
        assert!(volume.volume_info.authors.is_empty());
    }

    #[test]
    fn test_deserialize_volume_without_info() {
        let volume: RawVolume = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(volume.volume_info, VolumeInfo::default());
    }
}
