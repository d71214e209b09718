pub mod book_catalog;
pub mod classifier;
pub mod config;
pub mod discovery;
pub mod labels;
pub mod llm;
pub mod metrics;
pub mod summary_cache;
pub mod teaser;
pub mod testing;

pub use book_catalog::{
    BookCatalog, BookCatalogError, GoogleBooksClient, ImageLinks, RawVolume, VolumeInfo,
};
pub use classifier::{book_text, classify, FALLBACK_LABELS};
pub use config::{
    load_config, load_config_from_str, load_config_or_defaults, validate_config, CacheConfig,
    CatalogConfig, Config, ConfigError, LabelsConfig, LlmConfig, SanitizedConfig, ServerConfig,
};
pub use discovery::{Discovery, DiscoveryError, SearchResult, SummaryResponse};
pub use labels::{LabelDictionaries, LabelError};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage, OpenAiClient};
pub use summary_cache::{CacheError, JsonFileCache, SummaryCache};
pub use teaser::{build_prompt, TeaserGenerator};
