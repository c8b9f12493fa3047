//! Error types for the doc2text library.
//!
//! Every error aborts the whole run at the stage where it occurs. There is
//! deliberately no page-level error type: the pipeline either produces a
//! complete, correctly ordered artifact or it produces nothing. A partial
//! artifact with silently dropped pages would be worse than a failure,
//! because nothing downstream could tell which pages are missing — page
//! identity is purely positional.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the doc2text library.
#[derive(Debug, Error)]
pub enum Doc2TextError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the input file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Input extension is neither a supported raster image nor a PDF.
    #[error(
        "unsupported input format: '.{extension}'\n\
         Supported: jpg, jpeg, png, tif, tiff, webp, pdf."
    )]
    UnsupportedFormat { extension: String },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// The source could not be decoded or rasterised: corrupt file,
    /// password-protected document, or the rasterisation library is
    /// missing/unbindable.
    #[error("failed to decode '{path}': {detail}")]
    DocumentDecode { path: PathBuf, detail: String },

    // ── Inference errors ──────────────────────────────────────────────────
    /// The OCR engine returned a result count inconsistent with the
    /// submitted batch. Never recovered from: padding or truncating would
    /// silently attribute text to the wrong page.
    #[error(
        "OCR engine returned {returned} results for a batch of {submitted} pages; \
         page attribution would be wrong, aborting"
    )]
    InferenceContractViolation { submitted: usize, returned: usize },

    /// The OCR engine itself failed.
    #[error("OCR inference failed: {detail}")]
    Inference { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_extension() {
        let e = Doc2TextError::UnsupportedFormat {
            extension: "docx".into(),
        };
        assert!(e.to_string().contains(".docx"), "got: {e}");
    }

    #[test]
    fn contract_violation_reports_both_counts() {
        let e = Doc2TextError::InferenceContractViolation {
            submitted: 5,
            returned: 3,
        };
        let msg = e.to_string();
        assert!(msg.contains('5') && msg.contains('3'), "got: {msg}");
    }

    #[test]
    fn output_write_names_path() {
        let e = Doc2TextError::OutputWrite {
            path: PathBuf::from("/tmp/out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/tmp/out.txt"));
    }
}
