//! Output types returned by the extraction entry points.

use serde::{Deserialize, Serialize};

/// The result of a successful extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// The assembled document text: per-page plain text joined with the
    /// page-break delimiter, in input page order.
    pub text: String,
    /// Timing and usage statistics for the run.
    pub stats: ExtractionStats,
}

/// Statistics for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of pages extracted from the input document.
    pub page_count: usize,
    /// Wall-clock time spent decoding/rasterising pages.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent in the batched OCR inference call.
    pub inference_duration_ms: u64,
    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
    /// Prompt tokens consumed by the OCR engine (0 when the engine does
    /// not report usage).
    pub total_input_tokens: u64,
    /// Completion tokens produced by the OCR engine.
    pub total_output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_round_trips_through_json() {
        let output = ExtractionOutput {
            text: "Alpha".to_string(),
            stats: ExtractionStats {
                page_count: 1,
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&output).expect("serialise");
        let back: ExtractionOutput = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back.text, "Alpha");
        assert_eq!(back.stats.page_count, 1);
    }
}
