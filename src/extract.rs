//! Extraction entry points.
//!
//! The run is one linear pass: classify → extract pages → build batch →
//! infer → assemble → (optionally) write. Each transition happens only on
//! success; the first error aborts the whole run and no artifact is
//! produced. There is no resumption from a partial state — a retry starts
//! over from classification, which is cheap compared to the inference call
//! it protects.

use crate::classify;
use crate::config::ExtractionConfig;
use crate::engine::OcrEngine;
use crate::error::Doc2TextError;
use crate::output::{ExtractionOutput, ExtractionStats};
use crate::pipeline::{assemble, batch, infer, pages, write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Extract the text of a document.
///
/// This is the primary entry point for the library. The caller owns the
/// OCR engine and passes it in per run.
///
/// # Arguments
/// * `input_path` — path to a raster image (jpg/jpeg/png/tif/tiff/webp) or PDF
/// * `engine` — the model-invocation capability
/// * `config` — run configuration
///
/// # Errors
/// Any stage failure aborts the run: unsupported or unreadable input,
/// decode/rasterisation failure, engine failure, or an engine result count
/// that does not match the submitted batch.
pub async fn extract(
    input_path: impl AsRef<Path>,
    engine: &dyn OcrEngine,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Doc2TextError> {
    let total_start = Instant::now();
    let input_path = input_path.as_ref();
    info!("Starting extraction: {}", input_path.display());

    // ── Step 1: Validate and classify the input ──────────────────────────
    let path = resolve_input(input_path)?;
    let kind = classify::classify(&path)?;

    // ── Step 2: Extract pages ────────────────────────────────────────────
    let extract_start = Instant::now();
    let page_images = pages::extract_pages(&path, kind, config).await?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    let page_count = page_images.len();
    info!("Extracted {} pages in {}ms", page_count, extract_duration_ms);

    // ── Step 3: Build the batch ──────────────────────────────────────────
    let work_items = batch::build_batch(page_images, config.mode);

    // ── Step 4: Run inference ────────────────────────────────────────────
    let inference_start = Instant::now();
    let results = infer::run_inference(engine, work_items).await?;
    let inference_duration_ms = inference_start.elapsed().as_millis() as u64;

    // ── Step 5: Assemble the document ────────────────────────────────────
    let text = assemble::assemble_document(&results);

    let stats = ExtractionStats {
        page_count,
        extract_duration_ms,
        inference_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        total_input_tokens: results.iter().map(|r| r.input_tokens as u64).sum(),
        total_output_tokens: results.iter().map(|r| r.output_tokens as u64).sum(),
    };

    info!(
        "Extraction complete: {} pages, {}ms total",
        page_count, stats.total_duration_ms
    );

    Ok(ExtractionOutput { text, stats })
}

/// Extract a document and write the text artifact to a file.
///
/// The write is atomic (temp file + rename); a failed run leaves no
/// artifact at `output_path`.
pub async fn extract_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    engine: &dyn OcrEngine,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, Doc2TextError> {
    let output = extract(input_path, engine, config).await?;
    write::write_artifact(output_path.as_ref(), &output.text).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input_path: impl AsRef<Path>,
    engine: &dyn OcrEngine,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Doc2TextError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Doc2TextError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(extract(input_path, engine, config))
}

/// Validate that the input exists and is readable.
fn resolve_input(path: &Path) -> Result<PathBuf, Doc2TextError> {
    if !path.exists() {
        return Err(Doc2TextError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(Doc2TextError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(_) => Err(Doc2TextError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_file_not_found() {
        let err = resolve_input(Path::new("/definitely/not/a/real/file.png")).unwrap_err();
        assert!(matches!(err, Doc2TextError::FileNotFound { .. }));
    }

    #[test]
    fn existing_input_resolves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"bytes").expect("seed");
        assert_eq!(resolve_input(&path).unwrap(), path);
    }
}
