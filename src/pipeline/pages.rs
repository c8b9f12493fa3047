//! Page extraction: decode the input into an ordered sequence of RGB pages.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto a dedicated
//! thread-pool thread designed for blocking operations, preventing the
//! Tokio worker threads from stalling during CPU-heavy rendering.
//!
//! ## Why normalise to RGB?
//!
//! Inputs arrive as grayscale scans, paletted PNGs, or RGBA exports. The
//! engine contract expects a uniform 3-channel surface per page, so every
//! decode path ends in `to_rgb8()` — alpha is dropped, grayscale and
//! indexed images are expanded.

use crate::classify::DocumentKind;
use crate::config::ExtractionConfig;
use crate::error::Doc2TextError;
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// One decoded, colour-normalised page.
///
/// `index` is the page's zero-based position within the input document and
/// is the page's only identity through the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub index: usize,
    pub image: RgbImage,
}

/// Decode the input into its ordered page sequence.
pub async fn extract_pages(
    path: &Path,
    kind: DocumentKind,
    config: &ExtractionConfig,
) -> Result<Vec<PageImage>, Doc2TextError> {
    match kind {
        DocumentKind::RasterImage => Ok(vec![load_single_image(path)?]),
        DocumentKind::PaginatedDocument => rasterize_document(path, config).await,
    }
}

/// Decode a single raster image as page 0.
fn load_single_image(path: &Path) -> Result<PageImage, Doc2TextError> {
    let img = image::open(path).map_err(|e| Doc2TextError::DocumentDecode {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let image = img.to_rgb8();
    debug!("Decoded image → {}x{} px", image.width(), image.height());
    Ok(PageImage { index: 0, image })
}

/// Rasterise every page of a PDF at the configured DPI, in page order.
async fn rasterize_document(
    pdf_path: &Path,
    config: &ExtractionConfig,
) -> Result<Vec<PageImage>, Doc2TextError> {
    let path = pdf_path.to_path_buf();
    let dpi = config.dpi;
    let rasterizer_path = config.rasterizer_path.clone();

    tokio::task::spawn_blocking(move || rasterize_blocking(&path, dpi, rasterizer_path.as_deref()))
        .await
        .map_err(|e| Doc2TextError::Internal(format!("rasterisation task panicked: {e}")))?
}

/// Blocking implementation of PDF rasterisation.
fn rasterize_blocking(
    pdf_path: &Path,
    dpi: u32,
    rasterizer_path: Option<&Path>,
) -> Result<Vec<PageImage>, Doc2TextError> {
    let pdfium = bind_rasterizer(pdf_path, rasterizer_path)?;

    let document =
        pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| Doc2TextError::DocumentDecode {
                path: pdf_path.to_path_buf(),
                detail: format!("{e:?}"),
            })?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let mut results = Vec::with_capacity(pages.len() as usize);

    for (index, page) in pages.iter().enumerate() {
        // Page dimensions are in PDF points (1/72 inch); scale to the
        // requested DPI.
        let scale = dpi as f32 / 72.0;
        let render_config = PdfRenderConfig::new()
            .set_target_width(((page.width().value * scale) as i32).max(1))
            .set_target_height(((page.height().value * scale) as i32).max(1));

        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| Doc2TextError::DocumentDecode {
                    path: pdf_path.to_path_buf(),
                    detail: format!("rasterisation failed for page {}: {e:?}", index + 1),
                })?;

        let image = bitmap.as_image().into_rgb8();
        debug!(
            "Rendered page {} → {}x{} px",
            index + 1,
            image.width(),
            image.height()
        );

        results.push(PageImage { index, image });
    }

    Ok(results)
}

/// Bind to the pdfium shared library.
///
/// A configured `rasterizer_path` wins; otherwise the system library is
/// used. A binding failure means every paginated document is undecodable,
/// so it is reported as a decode error for the document being processed.
fn bind_rasterizer(pdf_path: &Path, library_dir: Option<&Path>) -> Result<Pdfium, Doc2TextError> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| Doc2TextError::DocumentDecode {
        path: pdf_path.to_path_buf(),
        detail: format!("pdfium rasteriser unavailable: {e}"),
    })?;

    Ok(Pdfium::new(bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use image::{Rgb, RgbImage};

    #[tokio::test]
    async fn raster_input_yields_exactly_one_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.png");
        RgbImage::from_pixel(8, 8, Rgb([9, 9, 9]))
            .save(&path)
            .expect("write png");

        let kind = classify(&path).expect("classify");
        let config = ExtractionConfig::default();
        let pages = extract_pages(&path, kind, &config).await.expect("extract");

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 0);
        assert_eq!(pages[0].image.dimensions(), (8, 8));
    }

    #[tokio::test]
    async fn grayscale_input_is_normalised_to_rgb() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(4, 4, image::Luma([128]))
            .save(&path)
            .expect("write png");

        let pages = extract_pages(&path, DocumentKind::RasterImage, &ExtractionConfig::default())
            .await
            .expect("extract");

        // Three channels after normalisation, regardless of source format.
        assert_eq!(pages[0].image.get_pixel(0, 0), &Rgb([128, 128, 128]));
    }

    #[tokio::test]
    async fn corrupt_image_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").expect("write");

        let err = extract_pages(&path, DocumentKind::RasterImage, &ExtractionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Doc2TextError::DocumentDecode { .. }));
    }
}
