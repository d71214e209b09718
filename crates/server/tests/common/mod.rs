//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, so the HTTP surface can be exercised
//! without network access.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use bookblurb_core::{
    testing::{MockBookCatalog, MockLlmClient},
    CacheConfig, Config, Discovery, JsonFileCache, TeaserGenerator,
};
use bookblurb_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use bookblurb_core::testing::fixtures;

/// Trigger labels loaded by every fixture.
pub const TRIGGERS: &[&str] = &["violence", "death", "abuse"];

/// Theme labels loaded by every fixture.
pub const THEMES: &[&str] = &["heist", "dystopia", "friendship"];

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - The book catalog (MockBookCatalog)
/// - The language model (MockLlmClient)
///
/// The summary cache is a real JSON file in a temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.catalog.add_volume(fixtures::volume("vol-1", "T", "D")).await;
///
///     let response = fixture.get("/search?q=anything").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure volumes and failures
    pub catalog: Arc<MockBookCatalog>,
    /// Mock language model - configure teasers and failures
    pub llm: Arc<MockLlmClient>,
    /// Path of the summary cache file
    pub cache_path: PathBuf,
    /// Temporary directory holding the cache file
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cache_path = temp_dir.path().join("summary_cache.json");

        let catalog = Arc::new(MockBookCatalog::new());
        let llm = Arc::new(MockLlmClient::new());
        let labels = Arc::new(fixtures::labels(TRIGGERS, THEMES));

        let config = Config {
            cache: CacheConfig {
                path: cache_path.clone(),
            },
            ..Default::default()
        };

        let discovery = Discovery::new(
            catalog.clone(),
            labels,
            TeaserGenerator::from_config(llm.clone(), &config.llm),
            Arc::new(JsonFileCache::new(cache_path.clone())),
        );

        let state = Arc::new(AppState::new(config, discovery));
        let router = create_router(state);

        Self {
            router,
            catalog,
            llm,
            cache_path,
            temp_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request with extra headers.
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Read the summary cache file as JSON, or `Value::Null` if absent.
    pub fn cache_contents(&self) -> Value {
        match std::fs::read_to_string(&self.cache_path) {
            Ok(text) => serde_json::from_str(&text).expect("Cache file is not valid JSON"),
            Err(_) => Value::Null,
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}
