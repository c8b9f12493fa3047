//! System prompts for VLM-based page transcription.
//!
//! Centralising the prompts here serves two purposes:
//!
//! 1. **Single source of truth** — changing transcription behaviour (e.g.
//!    how tables are handled) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    spinning up a real model, so prompt regressions are easy to catch.

use crate::config::ProcessingMode;

/// Prompt for [`ProcessingMode::LayoutAware`]: reading order follows the
/// visual layout; tables and multi-column text are linearised the way a
/// human reads them.
pub const LAYOUT_AWARE_PROMPT: &str = r#"You are an expert OCR engine. Transcribe the page image to Markdown.

Follow these rules precisely:

1. TEXT PRESERVATION
   - Transcribe ALL text content completely and accurately
   - Follow the visual reading order a human would use, including across
     columns
   - Do not correct, summarise, or paraphrase anything

2. STRUCTURE
   - Use Markdown headings to mirror the page's heading hierarchy
   - Convert tables to GFM pipe format, preserving row and column order
   - Preserve list structure and nesting

3. WHAT TO IGNORE
   - Page numbers, repeated headers/footers, watermarks
   - Decorative borders and lines that carry no content meaning

4. OUTPUT FORMAT
   - Output ONLY the transcription
   - Do NOT wrap the answer in ```markdown fences
   - Do NOT add commentary or explanations
   - Start directly with the page content"#;

/// Prompt for [`ProcessingMode::Plain`]: straight transcription, no layout
/// reconstruction.
pub const PLAIN_PROMPT: &str = r#"You are an expert OCR engine. Transcribe the page image as plain text.

Follow these rules precisely:

1. Transcribe ALL text content completely and accurately, top to bottom
2. Separate paragraphs with a blank line; use no other formatting
3. Ignore page numbers, repeated headers/footers, and watermarks
4. Output ONLY the transcription — no fences, no commentary"#;

/// Select the system prompt for a processing mode.
pub fn system_prompt(mode: ProcessingMode) -> &'static str {
    match mode {
        ProcessingMode::LayoutAware => LAYOUT_AWARE_PROMPT,
        ProcessingMode::Plain => PLAIN_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mode_has_a_distinct_prompt() {
        assert_ne!(
            system_prompt(ProcessingMode::LayoutAware),
            system_prompt(ProcessingMode::Plain)
        );
    }

    #[test]
    fn prompts_forbid_fence_wrapping() {
        for mode in [ProcessingMode::LayoutAware, ProcessingMode::Plain] {
            assert!(system_prompt(mode).contains("fences"), "mode {mode}");
        }
    }
}
