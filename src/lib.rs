//! # doc2text
//!
//! Extract plain text from scanned documents and PDFs using Vision
//! Language Models (VLMs).
//!
//! ## Why this crate?
//!
//! Classic OCR stacks work glyph-by-glyph and fall apart on noisy scans,
//! multi-column layouts, and tables. A vision model reads the whole page
//! the way a human does. This crate owns everything around that model
//! call: input classification, page rasterisation, batch construction,
//! markup-to-text reduction, and ordered reassembly into a single artifact
//! with explicit page-break markers.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image / PDF
//!  │
//!  ├─ 1. Classify  extension → raster image or paginated document
//!  ├─ 2. Pages     decode, or rasterise via pdfium at 300 DPI; RGB-normalise
//!  ├─ 3. Batch     tag every page with the run's processing mode
//!  ├─ 4. Infer     one batched call to the injected OCR engine
//!  ├─ 5. Assemble  Markdown → plain text, join with "=== PAGE BREAK ==="
//!  └─ 6. Write     atomic UTF-8 artifact
//! ```
//!
//! The whole pipeline is index-preserving: page N of the input is work item
//! N, result N, and the Nth text segment of the output. No stage reorders,
//! drops, or pads.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2text::{extract_to_file, ExtractionConfig, VisionLlmEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let engine = VisionLlmEngine::from_env(None)?;
//!     let config = ExtractionConfig::default();
//!     let stats = extract_to_file("scan.pdf", "scan.txt", &engine, &config).await?;
//!     eprintln!("{} pages in {}ms", stats.page_count, stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Bring your own engine
//!
//! The model is a capability, not a dependency: implement
//! [`engine::OcrEngine`] to plug in a local model, a different API, or a
//! test stub. The pipeline only requires one result per submitted page, in
//! submission order — it verifies the count and aborts on a mismatch rather
//! than mis-attribute text to the wrong page.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2text` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use classify::{classify, DocumentKind};
pub use config::{ExtractionConfig, ExtractionConfigBuilder, ProcessingMode};
pub use engine::{OcrEngine, RawModelResult, VisionLlmEngine};
pub use error::Doc2TextError;
pub use extract::{extract, extract_sync, extract_to_file};
pub use output::{ExtractionOutput, ExtractionStats};
pub use pipeline::assemble::PAGE_BREAK;
