//! Production OCR engine backed by `edgequake-llm` vision providers.
//!
//! One engine instance wraps one vision-capable chat provider (OpenAI,
//! Anthropic, Gemini, Ollama, …) and turns each work item into a vision
//! chat request: the mode-selected system prompt plus the page PNG as a
//! base64 image attachment.
//!
//! ## Ordering
//!
//! Pages are recognised with bounded internal concurrency, but the stream
//! is `buffered`, not `buffer_unordered`: results come back in submission
//! order, which is the contract every [`OcrEngine`] must honour.
//!
//! ## Retry Strategy
//!
//! HTTP 429 / 503 errors from LLM APIs are transient and frequent under
//! concurrent load. Each page retries with exponential backoff
//! (`retry_backoff_ms * 2^attempt`); with the 500 ms base and 3 retries the
//! wait sequence is 500 ms → 1 s → 2 s. A page that still fails after the
//! last retry fails the whole batch — the pipeline has no representation
//! for a partially recognised document.

use crate::engine::{encode, prompts, OcrEngine, RawModelResult};
use crate::error::Doc2TextError;
use crate::pipeline::batch::WorkItem;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

/// OCR engine that drives a vision LLM provider.
pub struct VisionLlmEngine {
    provider: Arc<dyn LLMProvider>,
    concurrency: usize,
    max_retries: u32,
    retry_backoff_ms: u64,
    temperature: f32,
    max_tokens: usize,
}

impl VisionLlmEngine {
    /// Wrap a caller-constructed provider with default knobs.
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            concurrency: 4,
            max_retries: 3,
            retry_backoff_ms: 500,
            temperature: 0.1,
            max_tokens: 4096,
        }
    }

    /// Instantiate a named provider with the given model.
    pub fn from_provider_name(name: &str, model: &str) -> Result<Self, Doc2TextError> {
        let provider = ProviderFactory::create_llm_provider(name, model).map_err(|e| {
            Doc2TextError::Inference {
                detail: format!("provider '{name}' is not configured: {e}"),
            }
        })?;
        Ok(Self::new(provider))
    }

    /// Auto-detect a provider from the environment.
    ///
    /// OpenAI is preferred when `OPENAI_API_KEY` is set, so users with
    /// multiple provider keys get a deterministic default; otherwise the
    /// factory scans all known API key variables.
    pub fn from_env(model: Option<&str>) -> Result<Self, Doc2TextError> {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                return Self::from_provider_name("openai", model.unwrap_or("gpt-4.1-nano"));
            }
        }

        let (provider, _embedding) =
            ProviderFactory::from_env().map_err(|e| Doc2TextError::Inference {
                detail: format!(
                    "no vision provider could be auto-detected from the environment.\n\
                     Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or name a provider explicitly.\n\
                     Error: {e}"
                ),
            })?;
        Ok(Self::new(provider))
    }

    /// Number of in-flight page requests. Clamped to ≥ 1.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Retry attempts per page on a transient API failure.
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Initial retry delay in milliseconds (doubles per attempt).
    pub fn with_retry_backoff_ms(mut self, ms: u64) -> Self {
        self.retry_backoff_ms = ms;
        self
    }

    /// Sampling temperature. Low values keep the model faithful to the page.
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t.clamp(0.0, 2.0);
        self
    }

    /// Maximum tokens the model may generate per page.
    pub fn with_max_tokens(mut self, n: usize) -> Self {
        self.max_tokens = n;
        self
    }

    /// Recognise a single page, retrying transient failures.
    async fn recognize_page(&self, item: WorkItem) -> Result<RawModelResult, Doc2TextError> {
        let page_num = item.page.index + 1;

        let image_data =
            encode::encode_page(&item.page.image).map_err(|e| Doc2TextError::Inference {
                detail: format!("page {page_num}: image encoding failed: {e}"),
            })?;

        // The empty user text is intentional: vision APIs require at least
        // one user turn, but the image carries all the content.
        let messages = vec![
            ChatMessage::system(prompts::system_prompt(item.mode)),
            ChatMessage::user_with_images("", vec![image_data]),
        ];

        let options = CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            ..Default::default()
        };

        let mut last_err: Option<String> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = self.retry_backoff_ms * 2u64.pow(attempt - 1);
                warn!(
                    "Page {}: retry {}/{} after {}ms",
                    page_num, attempt, self.max_retries, backoff
                );
                sleep(Duration::from_millis(backoff)).await;
            }

            match self.provider.chat(&messages, Some(&options)).await {
                Ok(response) => {
                    debug!(
                        "Page {}: {} input tokens, {} output tokens",
                        page_num, response.prompt_tokens, response.completion_tokens
                    );
                    return Ok(RawModelResult {
                        markdown: response.content,
                        input_tokens: response.prompt_tokens as u32,
                        output_tokens: response.completion_tokens as u32,
                    });
                }
                Err(e) => {
                    warn!("Page {}: attempt {} failed — {}", page_num, attempt + 1, e);
                    last_err = Some(e.to_string());
                }
            }
        }

        Err(Doc2TextError::Inference {
            detail: format!(
                "page {page_num} failed after {} retries: {}",
                self.max_retries,
                last_err.unwrap_or_else(|| "unknown error".to_string())
            ),
        })
    }
}

#[async_trait]
impl OcrEngine for VisionLlmEngine {
    async fn recognize_batch(
        &self,
        batch: Vec<WorkItem>,
    ) -> Result<Vec<RawModelResult>, Doc2TextError> {
        stream::iter(batch.into_iter().map(|item| self.recognize_page(item)))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}
