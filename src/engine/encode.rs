//! Image encoding: RGB page → base64 PNG wrapped in `ImageData`.
//!
//! VLM APIs accept images as base64 data-URIs embedded in the JSON request
//! body. PNG is chosen over JPEG because it is lossless — text crispness
//! matters far more than file size for OCR accuracy, and JPEG artefacts on
//! rendered text measurably degrade transcription quality.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use edgequake_llm::ImageData;
use image::RgbImage;
use std::io::Cursor;
use tracing::debug;

/// Encode one page as a base64 PNG ready for a vision API request.
///
/// `detail: "high"` instructs GPT-4-class models to use the full image tile
/// budget; without it fine print and small tables are lost.
pub fn encode_page(image: &RgbImage) -> Result<ImageData, image::ImageError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded page → {} bytes base64", b64.len());

    Ok(ImageData::new(b64, "image/png").with_detail("high"))
}
