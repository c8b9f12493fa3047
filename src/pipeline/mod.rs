//! Pipeline stages for document text extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rasterisation backend) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! pages ──▶ batch ──▶ infer ──▶ assemble ──▶ write
//! (decode)  (tag)    (model)   (md → text)  (atomic)
//! ```
//!
//! 1. [`pages`]    — decode a raster image or rasterise a PDF into an
//!    ordered sequence of RGB page images; pdfium work runs in
//!    `spawn_blocking` because it is not async-safe
//! 2. [`batch`]    — pair each page with the run's processing-mode tag
//! 3. [`infer`]    — submit the whole batch to the OCR engine in one call
//!    and enforce the one-result-per-page contract
//! 4. [`assemble`] — reduce each markup result to plain text and join the
//!    segments with the page-break delimiter
//! 5. [`write`]    — persist the assembled text atomically
//!
//! Every stage preserves order: page N of the input is work item N, result
//! N, and the Nth text segment of the output. No stage reorders,
//! interleaves, or drops elements.

pub mod assemble;
pub mod batch;
pub mod infer;
pub mod pages;
pub mod write;
