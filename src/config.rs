//! Configuration types for a text-extraction run.
//!
//! All behaviour is controlled through [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across runs, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! The config is pure data: the OCR engine is *not* part of it. The caller
//! constructs and owns the engine (see [`crate::engine::OcrEngine`]) and
//! passes it into the pipeline explicitly, so model loading and device
//! placement never leak into the extraction logic.

use crate::error::Doc2TextError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Lower bound for the rasterisation DPI knob.
pub const MIN_DPI: u32 = 72;
/// Upper bound for the rasterisation DPI knob.
pub const MAX_DPI: u32 = 600;

/// Configuration for a document text-extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2text::{ExtractionConfig, ProcessingMode};
///
/// let config = ExtractionConfig::builder()
///     .dpi(300)
///     .mode(ProcessingMode::Plain)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Rendering DPI used when rasterising each PDF page. Range: 72–600. Default: 300.
    ///
    /// 300 DPI keeps small print legible to the vision model. Lower it to
    /// 150 for clean digital-born documents where speed matters more than
    /// pixel density; raise it towards 600 only for dense scans, at a
    /// quadratic memory cost per page.
    pub dpi: u32,

    /// Extraction behaviour requested from the OCR model. Default:
    /// [`ProcessingMode::LayoutAware`].
    ///
    /// One mode applies to the whole run; per-page mode selection is not
    /// supported.
    pub mode: ProcessingMode,

    /// Directory containing the pdfium shared library.
    ///
    /// `None` (the default) binds to the system-installed library. Set this
    /// when pdfium lives in a non-standard location; binding failures
    /// surface as a decode error naming the document, since a missing
    /// rasteriser makes every paginated document undecodable.
    pub rasterizer_path: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            mode: ProcessingMode::LayoutAware,
            rasterizer_path: None,
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn mode(mut self, mode: ProcessingMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn rasterizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rasterizer_path = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, Doc2TextError> {
        let c = &self.config;
        if c.dpi < MIN_DPI || c.dpi > MAX_DPI {
            return Err(Doc2TextError::InvalidConfig(format!(
                "DPI must be {MIN_DPI}–{MAX_DPI}, got {}",
                c.dpi
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which extraction behaviour the OCR model applies to every page of a run.
///
/// The mode travels with each work item as a fixed tag; the engine maps it
/// to a system prompt (or an equivalent backend switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessingMode {
    /// Layout-aware OCR: reading order follows the visual layout; tables
    /// and multi-column text are linearised the way a human reads them.
    /// (default)
    #[default]
    LayoutAware,
    /// Plain OCR: straight transcription, no layout reconstruction.
    Plain,
}

impl ProcessingMode {
    /// The fixed tag string attached to work items.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::LayoutAware => "layout-aware",
            ProcessingMode::Plain => "plain",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
