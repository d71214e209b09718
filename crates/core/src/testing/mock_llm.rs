//! Mock LLM client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

const DEFAULT_RESPONSE: &str = "A delightful read you will not want to put down.";

/// Mock implementation of the LlmClient trait.
///
/// Returns a fixed response text, records every request and can be told
/// to fail once or to respond slowly.
#[derive(Debug)]
pub struct MockLlmClient {
    response: Arc<RwLock<String>>,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
    next_error: Arc<RwLock<Option<LlmError>>>,
    delay_ms: Arc<RwLock<u64>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            response: Arc::new(RwLock::new(DEFAULT_RESPONSE.to_string())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay_ms: Arc::new(RwLock::new(0)),
        }
    }

    /// Set the text returned by every completion.
    pub async fn set_response(&self, text: impl Into<String>) {
        *self.response.write().await = text.into();
    }

    /// Configure the next completion to fail with the given error.
    pub async fn set_next_error(&self, error: LlmError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every completion, to widen race windows in concurrency tests.
    pub async fn set_delay_ms(&self, delay_ms: u64) {
        *self.delay_ms.write().await = delay_ms;
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }

    /// Number of completions requested.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        let delay = *self.delay_ms.read().await;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(CompletionResponse {
            text: self.response.read().await.clone(),
            usage: LlmUsage {
                input_tokens: 42,
                output_tokens: 12,
            },
            model: "mock-model".to_string(),
        })
    }
}
