//! The OCR engine boundary.
//!
//! The pipeline never talks to a model directly. It talks to [`OcrEngine`],
//! a capability the caller constructs, owns, and injects per run. This
//! keeps model loading, device placement, credentials, and retry policy
//! outside the ordering/assembly logic — the part that actually needs to be
//! easy to test. Tests inject a stub; production injects
//! [`VisionLlmEngine`].
//!
//! The one hard requirement on implementations: given N work items, return
//! N results in the same order, or fail the whole batch. The invoker
//! enforces the length half of that contract; the order half cannot be
//! checked from outside and is the implementation's responsibility.

use crate::error::Doc2TextError;
use crate::pipeline::batch::WorkItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod encode;
pub mod prompts;
pub mod vision_llm;

pub use vision_llm::VisionLlmEngine;

/// The raw model output for one work item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModelResult {
    /// The markup payload as the model produced it.
    pub markdown: String,
    /// Prompt tokens consumed, when the backend reports usage.
    pub input_tokens: u32,
    /// Completion tokens produced.
    pub output_tokens: u32,
}

/// A model-invocation capability: batch of pages in, one result per page out.
///
/// Implementations may process pages internally however they like
/// (concurrently, with retries, against a remote API or a local model) as
/// long as the returned sequence is index-aligned with the submitted batch.
/// Partial results are not representable: any page that cannot be
/// recognised fails the whole call.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize_batch(
        &self,
        batch: Vec<WorkItem>,
    ) -> Result<Vec<RawModelResult>, Doc2TextError>;
}
