//! Inference invocation: one batched call to the OCR engine, contract-checked.
//!
//! The engine is called exactly once with the entire ordered batch — not
//! page-by-page. Fewer round trips to the model backend, and one place to
//! enforce the only hard invariant the engine must honour: one result per
//! work item, same order.
//!
//! A length mismatch is never repaired. Padding or truncating the result
//! sequence would silently attach text to the wrong pages, and positional
//! correspondence is the only page identity the pipeline has.

use crate::engine::{OcrEngine, RawModelResult};
use crate::error::Doc2TextError;
use crate::pipeline::batch::WorkItem;
use tracing::debug;

/// Submit the batch and verify the one-result-per-item contract.
///
/// Engine failures propagate unmodified; no retries happen here. Retry and
/// backoff policy, where wanted, lives inside the engine implementation.
pub async fn run_inference(
    engine: &dyn OcrEngine,
    batch: Vec<WorkItem>,
) -> Result<Vec<RawModelResult>, Doc2TextError> {
    let submitted = batch.len();
    debug!("Submitting batch of {} work items", submitted);

    let results = engine.recognize_batch(batch).await?;

    if results.len() != submitted {
        return Err(Doc2TextError::InferenceContractViolation {
            submitted,
            returned: results.len(),
        });
    }

    Ok(results)
}
