//! Testing utilities and mock implementations.
//!
//! Mocks for the external service traits so discovery and the HTTP layer
//! can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookblurb_core::testing::{fixtures, MockBookCatalog, MockLlmClient};
//!
//! let catalog = MockBookCatalog::new();
//! catalog.add_volume(fixtures::volume("vol-1", "Example Novel", "A thrilling heist")).await;
//!
//! let llm = MockLlmClient::new();
//! llm.set_response("A caper worth staying up for.").await;
//! ```

mod mock_book_catalog;
mod mock_llm;

pub use mock_book_catalog::{MockBookCatalog, RecordedCatalogCall};
pub use mock_llm::MockLlmClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::book_catalog::{ImageLinks, RawVolume, VolumeInfo};
    use crate::labels::LabelDictionaries;

    /// Build label dictionaries from string slices.
    pub fn labels(triggers: &[&str], themes: &[&str]) -> LabelDictionaries {
        LabelDictionaries::new(
            triggers.iter().map(|s| s.to_string()).collect(),
            themes.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// A catalog volume with a title, one author and a description.
    pub fn volume(id: &str, title: &str, description: &str) -> RawVolume {
        RawVolume {
            id: id.to_string(),
            volume_info: VolumeInfo {
                title: Some(title.to_string()),
                authors: vec!["Test Author".to_string()],
                description: Some(description.to_string()),
                image_links: Some(ImageLinks {
                    small_thumbnail: None,
                    thumbnail: Some(format!("http://books.example/{}.jpg", id)),
                }),
            },
        }
    }
}
