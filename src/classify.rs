//! Input format classification.
//!
//! Classification is a pure function of the filename extension,
//! case-insensitive, with no file-system access. Content sniffing is
//! deliberately out: the two ingestion strategies differ so much (a single
//! decode vs. a full rasterisation pass) that a mislabelled file should
//! fail loudly at decode time rather than be silently routed by magic
//! bytes the user never sees.

use crate::error::Doc2TextError;
use std::path::Path;

/// Extensions routed to the single-image ingestion strategy.
const RASTER_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "tif", "tiff", "webp"];

/// How an input document will be turned into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A single raster image: one page.
    RasterImage,
    /// A paginated document (PDF): one page per document page, rasterised.
    PaginatedDocument,
}

/// Classify an input path by its extension.
///
/// # Errors
/// Returns [`Doc2TextError::UnsupportedFormat`] naming the offending
/// extension (empty string when the path has none).
pub fn classify(path: &Path) -> Result<DocumentKind, Doc2TextError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if extension == "pdf" {
        Ok(DocumentKind::PaginatedDocument)
    } else if RASTER_EXTENSIONS.contains(&extension.as_str()) {
        Ok(DocumentKind::RasterImage)
    } else {
        Err(Doc2TextError::UnsupportedFormat { extension })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn raster_extensions_classify_as_raster() {
        for ext in ["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            let path = PathBuf::from(format!("scan.{ext}"));
            assert_eq!(
                classify(&path).unwrap(),
                DocumentKind::RasterImage,
                "extension {ext}"
            );
        }
    }

    #[test]
    fn pdf_classifies_as_paginated() {
        assert_eq!(
            classify(Path::new("report.pdf")).unwrap(),
            DocumentKind::PaginatedDocument
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            classify(Path::new("SCAN.PNG")).unwrap(),
            DocumentKind::RasterImage
        );
        assert_eq!(
            classify(Path::new("Report.Pdf")).unwrap(),
            DocumentKind::PaginatedDocument
        );
    }

    #[test]
    fn unknown_extension_is_rejected_and_named() {
        let err = classify(Path::new("notes.docx")).unwrap_err();
        match err {
            Doc2TextError::UnsupportedFormat { extension } => {
                assert_eq!(extension, "docx");
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(matches!(
            classify(Path::new("README")),
            Err(Doc2TextError::UnsupportedFormat { .. })
        ));
    }
}
